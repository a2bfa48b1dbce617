//! End-to-end command runs against a scripted server

#[path = "common/scripted.rs"]
mod scripted;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use docconvert_cli::{execute, settings, Cli, Command};
use pretty_assertions::assert_eq;
use scripted::Scripted;
use serde_json::json;

const BASE: &str = "https://cv.example.com";

const SMALL_PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF\n";
const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

fn write(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(bytes))
        .unwrap();
    path
}

async fn run(command: Command, server: &Scripted) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = execute(&command, server, BASE, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

// ============================================================
// Conversions
// ============================================================

#[tokio::test]
async fn merge_prints_absolute_download_link() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.pdf", SMALL_PDF);
    let b = write(&dir, "b.pdf", SMALL_PDF);
    let server = Scripted::new().reply(
        "/convert/upload/merge-pdfs",
        json!({"success": true, "message": "PDFs unidos", "download_url": "/convert/download/m.pdf", "filename": "m.pdf"}),
    );

    let (result, printed) = run(Command::Merge { files: vec![a, b] }, &server).await;

    result.unwrap();
    assert_eq!(
        printed,
        "PDFs unidos\nhttps://cv.example.com/convert/download/m.pdf\n"
    );
    let sent = server.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].files, vec!["a.pdf", "b.pdf"]);
}

#[tokio::test]
async fn disguised_pdf_is_not_uploaded_as_image() {
    let dir = tempfile::tempdir().unwrap();
    let fake = write(&dir, "foto.png", SMALL_PDF);
    let server = Scripted::new();

    let (result, printed) = run(Command::Images { files: vec![fake] }, &server).await;

    assert!(result.is_err());
    assert!(printed.is_empty());
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn images_are_posted_under_files_field() {
    let dir = tempfile::tempdir().unwrap();
    let img = write(&dir, "scan.png", PNG_HEADER);
    let server = Scripted::new().reply(
        "/convert/upload/images-to-pdf",
        json!({"success": true, "download_url": "/convert/download/i.pdf"}),
    );

    let (result, printed) = run(Command::Images { files: vec![img] }, &server).await;

    result.unwrap();
    assert!(printed.starts_with("Conversión completada\n"));
    assert_eq!(server.sent()[0].files, vec!["scan.png"]);
}

#[tokio::test]
async fn split_sends_normalized_page_fields() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(&dir, "doc.pdf", SMALL_PDF);
    let server = Scripted::new().reply(
        "/convert/upload/split-pdf",
        json!({"success": true, "download_url": "/convert/download/s.pdf"}),
    );

    let command = Command::Split {
        file: doc,
        start: " 2 ".to_string(),
        end: "4".to_string(),
    };
    run(command, &server).await.0.unwrap();

    assert_eq!(
        server.sent()[0].fields,
        vec![
            ("start_page".to_string(), "2".to_string()),
            ("end_page".to_string(), "4".to_string()),
        ]
    );
}

#[tokio::test]
async fn split_with_bad_page_never_reaches_server() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(&dir, "doc.pdf", SMALL_PDF);
    let server = Scripted::new();

    let command = Command::Split {
        file: doc,
        start: "abc".to_string(),
        end: "3".to_string(),
    };
    let (result, _) = run(command, &server).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Número de página inválido: abc"
    );
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn truncated_pdf_is_refused_locally() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.pdf", SMALL_PDF);
    let cut = write(&dir, "cut.pdf", b"%PDF-1.7\n1 0 obj\n");
    let server = Scripted::new();

    let (result, _) = run(Command::Merge { files: vec![a, cut] }, &server).await;

    assert!(result.unwrap_err().to_string().contains("cut.pdf"));
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn selection_guard_runs_before_structure_check() {
    let dir = tempfile::tempdir().unwrap();
    let cut = write(&dir, "cut.pdf", b"%PDF-1.7\n1 0 obj\n");
    let server = Scripted::new();

    let (result, _) = run(Command::Merge { files: vec![cut] }, &server).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Por favor selecciona al menos 2 PDFs"
    );
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn validator_runs_before_structure_check() {
    let dir = tempfile::tempdir().unwrap();
    let cut = write(&dir, "cut.pdf", b"%PDF-1.7\n1 0 obj\n");
    let photo = write(&dir, "photo.png", PNG_HEADER);
    let server = Scripted::new();

    let (result, _) = run(Command::Merge { files: vec![cut, photo] }, &server).await;

    let message = result.unwrap_err().to_string();
    assert!(message.contains("photo.png"), "{message}");
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.pdf", SMALL_PDF);
    let b = write(&dir, "b.pdf", SMALL_PDF);
    let server = Scripted::new().reply(
        "/convert/upload/merge-pdfs",
        json!({"success": false, "error": "Error al unir PDFs"}),
    );

    let (result, printed) = run(Command::Merge { files: vec![a, b] }, &server).await;

    assert_eq!(result.unwrap_err().to_string(), "Error al unir PDFs");
    assert!(printed.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.pdf", SMALL_PDF);
    let b = write(&dir, "b.pdf", SMALL_PDF);

    let (result, _) = run(Command::Merge { files: vec![a, b] }, &Scripted::new()).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Error de conexión: No se pudo conectar con el servidor"
    );
}

// ============================================================
// Info and donations
// ============================================================

#[tokio::test]
async fn info_prints_pages_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(&dir, "doc.pdf", SMALL_PDF);
    let server = Scripted::new().reply(
        "/convert/pdf-info",
        json!({"success": true, "info": {"pages": 12, "size_bytes": 2048, "size_mb": 0.0}}),
    );

    let (result, printed) = run(Command::Info { file: doc }, &server).await;

    result.unwrap();
    assert_eq!(printed, "Páginas: 12\nTamaño: 2.0 KB\n");
}

#[tokio::test]
async fn info_rejects_non_pdf_before_reading_it() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write(&dir, "photo.pdf", PNG_HEADER);
    let server = Scripted::new();

    let (result, _) = run(Command::Info { file: photo }, &server).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Solo se permiten archivos PDF: photo.pdf"
    );
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn donate_posts_cents_and_prints_checkout_url() {
    let server = Scripted::new().reply(
        "/stripe/create-checkout-session",
        json!({"url": "https://checkout.stripe.com/c/pay/cs_test"}),
    );

    let command = Command::Donate {
        amount_cents: None,
        amount: Some("$12.50".to_string()),
    };
    let (result, printed) = run(command, &server).await;

    result.unwrap();
    assert_eq!(server.sent()[0].json, Some(json!({"amount": 1250})));
    assert!(printed.ends_with("https://checkout.stripe.com/c/pay/cs_test\n"));
}

#[tokio::test]
async fn donation_below_minimum_is_refused() {
    let server = Scripted::new();
    let command = Command::Donate {
        amount_cents: Some(30),
        amount: None,
    };

    let (result, _) = run(command, &server).await;

    assert_eq!(result.unwrap_err().to_string(), "El monto mínimo es $0.50");
    assert!(server.sent().is_empty());
}

#[tokio::test]
async fn stripe_key_is_printed() {
    let server = Scripted::new().reply("/stripe/config", json!({"publicKey": "pk_test_123"}));
    let (result, printed) = run(Command::StripeKey, &server).await;
    result.unwrap();
    assert_eq!(printed, "pk_test_123\n");
}

// ============================================================
// Settings
// ============================================================

#[test]
fn flag_beats_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        &dir,
        "docconvert.toml",
        b"[server]\nbase_url = \"https://from-file.example\"\ntimeout_secs = 7\n",
    );
    let config = config.to_str().unwrap();

    let cli = Cli::try_parse_from(["docconvert", "--config", config, "stripe-key"]).unwrap();
    let from_file = settings(&cli).unwrap();
    assert_eq!(from_file.base_url, "https://from-file.example");
    assert_eq!(from_file.timeout.as_secs(), 7);

    let cli = Cli::try_parse_from([
        "docconvert",
        "--config",
        config,
        "--base-url",
        "http://localhost:8000/",
        "stripe-key",
    ])
    .unwrap();
    assert_eq!(settings(&cli).unwrap().base_url, "http://localhost:8000");
}
