//! gdoc2latex - Google Docs web-page export to LaTeX

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gdoc2latex::files::{convert_files, FileOptions};

/// A bold red "Error:".
const ERROR_PREFIX: &str = "\x1b[1;31mError:\x1b[0m";

#[derive(Parser)]
#[command(name = "gdoc2latex")]
#[command(version, about = "Converts Google Docs files to LaTeX", long_about = None)]
#[command(after_help = "Download the document with File > Download > Web page (.html),
unzip it, and run gdoc2latex next to the extracted index.html.")]
struct Cli {
    /// Input HTML file, downloaded from Google Docs
    #[arg(short, long, value_name = "FILE", default_value = "index.html")]
    input: PathBuf,

    /// Output TeX file
    #[arg(short, long, value_name = "FILE", default_value = "index.tex")]
    output: PathBuf,

    /// Overwrite existing outputs and create the output directory if necessary
    #[arg(short, long)]
    force: bool,

    /// Custom starting template TeX source
    #[arg(short = 's', long, value_name = "FILE")]
    template_start: Option<PathBuf>,

    /// Custom ending template TeX source
    #[arg(short = 'e', long, value_name = "FILE")]
    template_end: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = FileOptions {
        input: cli.input,
        output: cli.output,
        force: cli.force,
        template_start: cli.template_start,
        template_end: cli.template_end,
    };

    match convert_files(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{ERROR_PREFIX} {e}");
            ExitCode::from(1)
        }
    }
}
