//! quire - assemble a book model into an EPUB

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quire::{BodyPolicy, Book, Deliver, DirectoryTarget, EpubBuilder, EpubConfig};

#[derive(Parser)]
#[command(name = "quire")]
#[command(version, about = "Assemble named sections into an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    quire book.json                 Write <title>.epub to the current directory
    quire book.json -o out/         Write into out/
    quire book.json --trusted-markup  Embed section content as XHTML

BOOK FORMAT:
    {\"title\": \"My Book\", \"author\": \"Me\",
     \"sections\": [{\"name\": \"Intro\", \"content\": \"Hello\"}]}")]
struct Cli {
    /// Book model as JSON
    #[arg(value_name = "BOOK")]
    input: PathBuf,

    /// Directory to save the EPUB into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Treat section content as well-formed XHTML instead of plain text
    #[arg(long)]
    trusted_markup: bool,

    /// Deflate level for compressed entries (0-9)
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(u32).range(0..=9))]
    compression_level: Option<u32>,

    /// Use a fixed book identifier instead of a fresh UUID
    #[arg(long, value_name = "ID")]
    identifier: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Log build progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(path) => {
            if !cli.quiet {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, String> {
    let json = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("{}: {e}", cli.input.display()))?;
    let book: Book =
        serde_json::from_str(&json).map_err(|e| format!("{}: {e}", cli.input.display()))?;

    let mut config = EpubConfig::default();
    if cli.trusted_markup {
        config = config.with_body_policy(BodyPolicy::TrustedMarkup);
    }
    if let Some(level) = cli.compression_level {
        config = config.with_compression_level(level);
    }
    if let Some(ref id) = cli.identifier {
        config = config.with_identifier(id);
    }
    let builder = EpubBuilder::new().with_config(config);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;
    let artifact = runtime
        .block_on(builder.build(&book))
        .map_err(|e| e.to_string())?;

    let target = DirectoryTarget::new(&cli.output);
    target.deliver(&artifact).map_err(|e| e.to_string())?;
    Ok(target.path_for(&artifact))
}
