use crate::handlers::report::ReportOutcome;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn print_report_written(outcome: &ReportOutcome) {
    let status = if std::io::stdout().is_terminal() {
        format!("{}", "✓ Report written".green().bold())
    } else {
        "✓ Report written".to_string()
    };

    println!("{}: {}", status, outcome.output.display());
    println!("  Title: {}", outcome.title);
    println!("  Sections: {}", outcome.sections);
    if outcome.layers > 0 {
        println!("  Layers: {}", outcome.layers);
    }
}

pub fn print_init_written(path: &Path) {
    if std::io::stdout().is_terminal() {
        println!("{} {}", "Created".green().bold(), path.display());
    } else {
        println!("Created {}", path.display());
    }
    println!("Edit the sections, then run: rsreport report <database> <output> --config {}", path.display());
}
