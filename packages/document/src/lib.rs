//! # Livepad Document
//!
//! Turns editor source into a self-contained preview document.
//!
//! Source is first classified as markup or script. Markup becomes a document
//! on its own; script gets the runner document, which receives the code later
//! over the parent/frame handshake.

pub mod classifier;
pub mod fixtures;
pub mod synthesizer;

pub use classifier::{classify, ContentKind};
pub use fixtures::{load_fixture, Fixture, UnknownFixture, INITIAL_SOURCE};
pub use synthesizer::{
    delivery_failure_document, escape_html, html_document, js_string_literal, runner_document,
    synthesize, synthesize_with, validation_error_script, DocumentOptions, PreviewDocument,
    ROOT_ELEMENT_ID,
};
