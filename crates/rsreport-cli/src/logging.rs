use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = ["rsreport", "rsreport_core", "rsreport_index", "rsreport_project"];

/// Install the stderr subscriber. `RUST_LOG` wins over `--log-level`.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Our crates at `level`, everything else at `warn`
fn directives(level: LogLevel) -> String {
    let mut out = String::from("warn");
    for name in CRATES {
        out.push_str(&format!(",{}={}", name, level));
    }
    out
}
