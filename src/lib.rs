//! Postcraft - document analysis service.
//!
//! Extracts text from uploaded documents (plain text, PDF, images via OCR)
//! and asks a language model for engagement and SEO feedback.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod server;
pub mod services;
