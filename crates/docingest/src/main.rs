use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use docingest::{
    ARCHIVE_EXTENSIONS, Config, Context, DocumentReader, OFFICE_EXTENSIONS, PDF_EXTENSIONS,
    TEXT_EXTENSIONS,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "docingest", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
struct App {
    #[arg(long, global = true, help = "Configuration file (default: ./docingest.toml)")]
    config: Option<PathBuf>,
    #[arg(long, short, global = true, help = "Log at debug level")]
    verbose: bool,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(alias = "p", name = "process", about = "Process files and archives")]
    Process(ProcessArg),
    #[command(alias = "i", name = "interactive", about = "Read paths from stdin until 'quit'")]
    Interactive(OutputArg),
    #[command(name = "formats", about = "List supported formats and capabilities")]
    Formats,
}

#[derive(Debug, Args)]
struct ProcessArg {
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    #[command(flatten)]
    output: OutputArg,
}

#[derive(Debug, Args)]
struct OutputArg {
    #[arg(long, short, help = "Directory for JSON artifacts")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();
    let mut config =
        Config::load(app.config.as_deref()).context("failed to load configuration")?;

    let output_dir = match &app.cmd {
        Commands::Process(arg) => arg.output.output_dir.clone(),
        Commands::Interactive(arg) => arg.output_dir.clone(),
        Commands::Formats => None,
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    init_tracing(if app.verbose { "debug" } else { &config.log_level }, app.verbose);

    let ctx = Context::from_config(config);
    match app.cmd {
        Commands::Process(arg) => Ok(process(&ctx, &arg.paths)),
        Commands::Interactive(_) => interactive(&ctx),
        Commands::Formats => {
            formats(&ctx);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(level: &str, force: bool) {
    let filter = if force {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn process(ctx: &Context, paths: &[PathBuf]) -> ExitCode {
    let reader = DocumentReader::new(ctx);
    let mut failed = false;
    for path in paths {
        let processed = reader.process_file(path);
        failed |= !processed.is_success();
        println!("{processed}");
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn interactive(ctx: &Context) -> Result<ExitCode> {
    let reader = DocumentReader::new(ctx);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("\nEnter a file path (or 'quit' to exit): ");
        stdout.flush().context("failed to write prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }
        if !Path::new(input).exists() {
            println!("File not found.");
            continue;
        }
        println!("{}", reader.process_file(input));
    }
    Ok(ExitCode::SUCCESS)
}

fn formats(ctx: &Context) {
    for (group, extensions) in [
        ("text", TEXT_EXTENSIONS),
        ("office", OFFICE_EXTENSIONS),
        ("pdf", PDF_EXTENSIONS),
        ("archive", ARCHIVE_EXTENSIONS),
    ] {
        println!("{group:<8} {}", extensions.join(" "));
    }

    println!("\ncapabilities:");
    for (capability, available) in ctx.capabilities().iter() {
        let state = if available { "available" } else { "unavailable" };
        println!("  {:<16} {state}", capability.name());
    }
}
