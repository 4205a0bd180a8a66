use super::args::{Cli, Commands};
use super::handlers;
use super::views;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            database,
            output,
            project,
            config,
            css,
        } => {
            let request = handlers::report::ReportRequest {
                database: &database,
                output: &output,
                project: project.as_deref(),
                config: config.as_deref(),
                css: &css,
            };
            let outcome = handlers::report::handle(&request)?;
            views::print_report_written(&outcome);
            Ok(())
        }

        Commands::Init { path, force } => {
            handlers::init::handle(&path, force)?;
            views::print_init_written(&path);
            Ok(())
        }
    }
}
