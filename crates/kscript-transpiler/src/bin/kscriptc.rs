//! KScript compiler CLI

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use kscript_transpiler::{CompileOptions, Compiler};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kscriptc")]
#[command(about = "KScript compiler - transpiles KScript sketches into JavaScript")]
#[command(version)]
struct Args {
    /// Input KScript source file (`-` for stdin)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the generated JavaScript to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// File with extra built-in names, one per line
    #[arg(short, long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// Exit with an error if any statement fails to transpile
    #[arg(long)]
    deny_errors: bool,
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut options = CompileOptions::new(&args.input)
        .verbose(args.verbose)
        .deny_errors(args.deny_errors);

    if let Some(output) = &args.output {
        options = options.output(output);
    }
    if let Some(keywords) = &args.keywords {
        options = options.keywords_file(keywords);
    }

    let output = Compiler::new(options)
        .compile()
        .with_context(|| format!("failed to compile {}", args.input.display()))?;

    // Diagnostics were already reported through tracing by the transpiler
    if args.output.is_none() {
        println!("{}", output.javascript);
    }
    Ok(())
}

/// Filter used when `RUST_LOG` is unset.
///
/// `#debug` traces are emitted at debug level on the `kscript` target.
fn default_filter(verbose: bool) -> String {
    let level = if verbose { "info" } else { "warn" };
    format!("{},kscript=debug", level)
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(args.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Compilation failed: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_debug_traces() {
        assert_eq!(default_filter(false), "warn,kscript=debug");
        assert_eq!(default_filter(true), "info,kscript=debug");
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
    }
}
