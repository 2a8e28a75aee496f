use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pdftext_core::{Config, Envelope, Extractor};
use pdftext_mupdf::MupdfBackend;

mod output;

/// Extract the text of a PDF and print it as a JSON object
///
/// Takes exactly one argument: an http:// or https:// URL, or a local path.
/// There are no flags; any other argument count prints the usage envelope.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// URL or path of the PDF to extract
    pdf_ref: String,
}

/// Accept exactly one argument, whatever it looks like. Clap only sees it
/// behind an explicit `--`, so `-x` or `--` itself is read as the reference.
fn parse_cli(mut args: Vec<OsString>) -> Option<Cli> {
    if args.len() != 2 {
        debug!(count = args.len().saturating_sub(1), "wrong argument count");
        return None;
    }
    args.insert(1, OsString::from("--"));
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) => {
            debug!(error = %e, "rejecting arguments");
            None
        }
    }
}

/// Logs go to stderr so stdout carries nothing but the JSON line.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    setup_logging();

    let envelope = match parse_cli(std::env::args_os().collect()) {
        Some(cli) => extract(&cli.pdf_ref).await,
        None => Envelope::usage(),
    };

    output::print_envelope(&mut std::io::stdout().lock(), &envelope)?;
    Ok(ExitCode::from(envelope.exit_code()))
}

async fn extract(pdf_ref: &str) -> Envelope {
    let config = Config::load();
    debug!(?config, pdf_ref, "starting extraction");

    let extractor = Extractor::new(MupdfBackend::new(), config);
    Envelope::from_result(extractor.try_extract(pdf_ref).await)
}
