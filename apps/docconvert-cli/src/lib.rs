//! Command-line client for a CV-DocConvert server
//!
//! Runs the same controllers as the web pages, with files read from disk, a
//! `reqwest` transport, and a view that prints to stdout.

pub mod cli;
pub mod config;
pub mod http;
pub mod local_file;
pub mod terminal;

use anyhow::Context;
use docconvert_core::config::MAX_FILE_SIZE;
use docconvert_core::file::format_bytes;
use docconvert_core::{
    ClientError, ConversionKind, DonationController, FormPart, Transport, UploadController,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub use cli::{Cli, Command};
pub use config::{Config, Settings};
pub use http::HttpTransport;
pub use local_file::LocalFile;
pub use terminal::TerminalView;

fn open_all(paths: &[PathBuf]) -> anyhow::Result<Vec<LocalFile>> {
    paths.iter().map(LocalFile::open).collect()
}

/// Settings from the config file (if any) overlaid with flags
pub fn settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.resolve(cli.base_url.clone(), cli.timeout_secs)
}

/// Run one command against `transport`, printing results to `out`
pub async fn execute<T, W>(
    command: &Command,
    transport: &T,
    base_url: &str,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport<File = LocalFile>,
    W: Write,
{
    match command {
        Command::Images { files } => {
            convert(ConversionKind::ImagesToPdf, transport, files, None, base_url, out).await
        }
        Command::Merge { files } => {
            convert(ConversionKind::MergePdfs, transport, files, None, base_url, out).await
        }
        Command::Split { file, start, end } => {
            convert(
                ConversionKind::SplitPdf,
                transport,
                std::slice::from_ref(file),
                Some((start.as_str(), end.as_str())),
                base_url,
                out,
            )
            .await
        }
        Command::Info { file } => {
            let file = LocalFile::open(file)?;
            docconvert_core::validate_pdf_files(std::slice::from_ref(&file))?;
            file.check_pdf_structure(MAX_FILE_SIZE)?;
            let info = docconvert_core::fetch_pdf_info(transport, &file).await?;
            writeln!(out, "Páginas: {}", info.pages)?;
            writeln!(out, "Tamaño: {}", format_bytes(info.size_bytes))?;
            Ok(())
        }
        Command::Donate {
            amount_cents,
            amount,
        } => {
            let mut controller = DonationController::new(TerminalView::new(&mut *out, base_url));
            match (amount_cents, amount) {
                (Some(cents), _) => controller.select_amount(*cents),
                (None, Some(raw)) => {
                    controller.select_custom_amount(raw)?;
                }
                (None, None) => {}
            }
            controller.handle_donate(transport).await?;
            Ok(())
        }
        Command::StripeKey => {
            let key = docconvert_core::fetch_public_key(transport).await?;
            writeln!(out, "{}", key)?;
            Ok(())
        }
    }
}

async fn convert<T, W>(
    kind: ConversionKind,
    transport: &T,
    paths: &[PathBuf],
    pages: Option<(&str, &str)>,
    base_url: &str,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: Transport<File = LocalFile>,
    W: Write,
{
    let files = open_all(paths)?;
    debug!(kind = kind.name(), files = files.len(), "Files opened");

    let mut controller = UploadController::new(kind, TerminalView::new(&mut *out, base_url));
    let (ticket, form) = controller.begin(&files, pages)?;

    // Only files that passed the selection guard and the validator are read in full
    for part in form.parts() {
        if let FormPart::File { file, .. } = part {
            file.check_pdf_structure(MAX_FILE_SIZE)?;
        }
    }

    let outcome = transport.post_form(kind.endpoint(), form).await;
    controller
        .finish(ticket, outcome)
        .unwrap_or(Err(ClientError::Superseded))?;
    Ok(())
}

/// Entry point shared by `main`
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = settings(&cli)?;
    debug!(base_url = %settings.base_url, timeout = ?settings.timeout, "Resolved settings");

    let transport = HttpTransport::new(settings.base_url.clone(), settings.timeout)
        .context("Failed to build HTTP client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &transport, transport.base_url(), &mut out).await
}
