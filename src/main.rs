use std::{env, fs::read_to_string, path::PathBuf, str::FromStr, time::Instant};

use anyhow::Context;
use clap::Parser;
use monkey_parser::{format_error, lexer::lexer::tokenize, parser::parser::parse};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Parse a source file and print the canonical form of every statement.
#[derive(clap::Parser)]
#[clap(version)]
struct Args {
    /// The source file to parse
    source: PathBuf,

    /// Print the token stream before parsing
    #[clap(long)]
    tokens: bool,

    /// Only report diagnostics, do not print the parsed program
    #[clap(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    initialize_logging()?;

    let args = Args::parse();

    let file_name = args
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let file_contents = read_to_string(&args.source)
        .with_context(|| format!("failed to read {}", args.source.display()))?;

    if args.tokens {
        for token in tokenize(file_contents.clone(), file_name.clone()) {
            token.debug();
        }
    }

    let start = Instant::now();
    let (parser, program) = parse(file_contents.clone(), file_name);

    info!("Parsed in {:?}", start.elapsed());

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            eprint!("{}", format_error(error, &file_contents, &args.source));
        }
        anyhow::bail!("found {} parse error(s)", parser.errors().len());
    }

    if !args.quiet {
        for stmt in &program.statements {
            println!("{}", stmt);
        }
    }

    Ok(())
}

fn initialize_logging() -> anyhow::Result<()> {
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| String::from("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_str(&env_filter)?),
        )
        .init();

    Ok(())
}
