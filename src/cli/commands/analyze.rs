//! Document commands: extraction, analysis and tool checks.

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::models::{FileKind, UploadedFile};
use crate::ocr::{pdf_page_count, TextExtractor};
use crate::services::AnalyzeService;

/// Read a file from disk into an upload, keeping only its file name.
async fn load_upload(path: &Path) -> anyhow::Result<UploadedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile::new(filename, bytes))
}

/// Extract text and print the AI review.
pub async fn cmd_analyze(settings: &Settings, path: &Path, json: bool) -> anyhow::Result<()> {
    let upload = load_upload(path).await?;
    let service = AnalyzeService::from_settings(settings)?;

    if !json {
        println!(
            "{} Analyzing {} with {}",
            style("→").cyan(),
            style(path.display()).bold(),
            service.analyzer().model_name()
        );
    }

    let report = service.process(upload).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let sections = [
        ("Extracted Text", &report.extracted_text),
        ("Analysis", &report.analysis),
        ("Recommendations", &report.recommendations),
        ("Rewrite", &report.rewrite),
    ];
    for (title, body) in sections {
        println!("\n{}", style(title).bold().underlined());
        println!("{}", body);
    }

    Ok(())
}

/// Extract text only.
pub async fn cmd_extract(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    let upload = load_upload(path).await?;
    let extractor = TextExtractor::with_config(settings.ocr.clone());

    if upload.kind() == Some(FileKind::Pdf) {
        if let Some(pages) = pdf_page_count(&upload.bytes) {
            eprintln!("{}", style(format!("{} page(s)", pages)).dim());
        }
    }

    let text = extractor.extract(&upload).await?;
    println!("{}", text);
    Ok(())
}

/// Check tool availability and model configuration.
pub fn cmd_tools(settings: &Settings) -> anyhow::Result<()> {
    println!("\n{}", style("OCR Tool Status").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;
    for (tool, available) in TextExtractor::check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    let extractor = TextExtractor::with_config(settings.ocr.clone());
    let ocr = extractor.ocr_backend();
    if !ocr.is_available() {
        println!("                  {}", style(ocr.availability_hint()).dim());
    }

    println!("\n{}", style("Model").bold());
    println!("{}", "-".repeat(50));
    let llm = &settings.llm;
    println!("  {:<15} {}", "Provider", llm.provider);
    println!("  {:<15} {}", "Model", llm.model);
    println!("  {:<15} {}", "Endpoint", llm.endpoint);
    let key_status = if !llm.provider.requires_api_key() {
        style("not required").dim()
    } else if llm.api_key.is_some() {
        style("✓ set").green()
    } else {
        all_found = false;
        style("✗ missing").red()
    };
    println!("  {:<15} {}", "API key", key_status);

    if !all_found {
        println!(
            "\n{} Image uploads need tesseract; analysis needs a model API key.",
            style("!").yellow()
        );
    }

    Ok(())
}
