// Check observed log telemetry against an expectation file, or flatten several files into one
// Usage:
//   check_logs <observed.yaml> <expected.yaml> [--exact] [--config <assertions.yaml>]
//   check_logs --flatten <logs.yaml> [<logs.yaml> ...]
//   Optional: TELEMETRY_BUILD_VERSION, RUST_LOG
//   cargo run --features cli --bin check_logs

use std::process::ExitCode;

use telemetry::configuration::AssertionConfig;
use telemetry::logs::{flatten_resource_logs, ResourceLogs};
use telemetry::TelemetryError;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  check_logs <observed.yaml> <expected.yaml> [--exact] [--config <assertions.yaml>]
  check_logs --flatten <logs.yaml> [<logs.yaml> ...]";

enum Command {
    Check {
        observed: String,
        expected: String,
        config: Option<String>,
        exact: bool,
    },
    Flatten {
        paths: Vec<String>,
    },
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    if args.first().map(String::as_str) == Some("--flatten") {
        let paths = args[1..].to_vec();
        if paths.is_empty() {
            return Err("--flatten needs at least one file".to_string());
        }
        return Ok(Command::Flatten { paths });
    }

    let mut positional = Vec::new();
    let mut config = None;
    let mut exact = false;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exact" => exact = true,
            "--config" => {
                config = Some(args.next().ok_or("--config needs a file")?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            _ => positional.push(arg),
        }
    }
    match <[String; 2]>::try_from(positional) {
        Ok([observed, expected]) => Ok(Command::Check {
            observed,
            expected,
            config,
            exact,
        }),
        Err(_) => Err("expected an observed and an expected file".to_string()),
    }
}

fn check(
    observed: &str,
    expected: &str,
    config: Option<&str>,
    exact: bool,
) -> Result<(), TelemetryError> {
    let mut config = match config {
        Some(path) => AssertionConfig::load(path)?,
        None => AssertionConfig::default(),
    };
    config.exact |= exact;
    let version = config.version_source();

    let mut observed = ResourceLogs::load_with(observed, version.as_ref())?;
    let expected = ResourceLogs::load_with(expected, version.as_ref())?;
    info!(
        "comparing {} observed logs against {} expected logs",
        observed.record_count(),
        expected.record_count()
    );

    if config.exact {
        return observed.equivalent(&expected);
    }
    if config.flatten_observed {
        observed = observed.flatten()?;
    }
    observed.contains_all(&expected)?;
    Ok(())
}

fn flatten(paths: &[String]) -> Result<String, TelemetryError> {
    let collections = paths
        .iter()
        .map(ResourceLogs::load)
        .collect::<Result<Vec<_>, _>>()?;
    flatten_resource_logs(&collections)?.to_yaml_string()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command = match parse_args(std::env::args().skip(1).collect()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Flatten { paths } => match flatten(&paths) {
            Ok(yaml) => {
                print!("{}", yaml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error flattening logs: {}", e);
                ExitCode::from(2)
            }
        },
        Command::Check {
            observed,
            expected,
            config,
            exact,
        } => match check(&observed, &expected, config.as_deref(), exact) {
            Ok(()) => {
                println!("✓ {} contains all logs in {}", observed, expected);
                ExitCode::SUCCESS
            }
            Err(TelemetryError::Containment(e)) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Error checking logs: {}", e);
                ExitCode::from(2)
            }
        },
    }
}
