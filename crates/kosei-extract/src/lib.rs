//! Recovery of corrected text from model responses.
//!
//! Chat-completion models asked for a strict JSON object still reply in a
//! handful of shapes: bare JSON, fenced code blocks, JSON buried in prose,
//! truncated JSON, or plain prose. [`extract_corrected_text`] tries a fixed
//! cascade of strategies and reports which one succeeded.

pub mod extractor;

pub use extractor::{
    extract_corrected_text, ExtractError, Extraction, Strategy, CORRECTED_TEXT_KEY,
};
