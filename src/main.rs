//! CLI entry point for pathseek

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use pathseek::{Console, FormatSink, OutputFormat, SearchConfig, SearchError, Searcher};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Colors apply to the status lines on stderr, never to matches.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let env = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty());
            if env("NO_COLOR").is_some() {
                false
            } else if env("FORCE_COLOR").is_some() {
                true
            } else {
                env("TERM").is_none_or(|t| t != "dumb") && std::io::stderr().is_terminal()
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pathseek")]
#[command(about = "Search a directory tree for paths containing a string")]
#[command(version)]
struct Args {
    /// Query to search for, used when --query is not given
    #[arg(value_name = "QUERY")]
    query_arg: Option<String>,

    /// Root directory to search (empty for the home directory)
    #[arg(long, default_value = ".")]
    root: String,

    /// Query to search for
    #[arg(short, long, default_value = "")]
    query: String,

    /// Stream results as JSON
    #[arg(long)]
    json: bool,

    /// Number of worker threads (0 = auto-detect)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log pipeline diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let console = Arc::new(Console::new(should_use_color(args.color)));
    match run(&args, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = console.fatal(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, console: &Arc<Console>) -> Result<(), SearchError> {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let config = SearchConfig::resolve(
        Path::new(&args.root),
        &args.query,
        args.query_arg.as_deref(),
        format,
    )?
    .with_workers(args.jobs);

    let _ = console.info(&format!(
        "-> Searching for `{}` in `{}`",
        config.query,
        config.root.display()
    ));

    let searcher = Searcher::new(config).with_warnings(console.clone());
    let mut sink = FormatSink::stdout(searcher.config().format);
    let outcome = searcher.run(&mut sink)?;

    let _ = console.success(&format!(
        "-> Found {} results in {} ms",
        outcome.matches.len(),
        outcome.elapsed_ms()
    ));
    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pathseek=debug")
        } else {
            EnvFilter::new("off")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(verbose)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_color_modes_ignore_environment() {
        assert!(should_use_color(ColorMode::Always));
        assert!(!should_use_color(ColorMode::Never));
    }

    #[test]
    fn test_color_flag_parses() {
        let args = Args::parse_from(["pathseek", "--color", "never", "apple"]);
        assert!(matches!(args.color, ColorMode::Never));
        assert_eq!(args.query_arg.as_deref(), Some("apple"));
    }
}
