use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// How a piece of source text is previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    /// Markup rendered as a document of its own
    HtmlFragment,
    /// Script executed by the runner document
    ScriptSource,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::HtmlFragment => "html",
            ContentKind::ScriptSource => "script",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn document_marker() -> &'static regex::Regex {
    static MARKER: OnceLock<regex::Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        regex::Regex::new(r"(?i)<!doctype|<html").expect("document marker pattern is valid")
    })
}

/// True when the text contains a `<!doctype` or `<html` marker, in any case
fn has_document_marker(text: &str) -> bool {
    document_marker().is_match(text)
}

/// Strip surrounding whitespace, including a byte-order mark
pub(crate) fn trim_source(source: &str) -> &str {
    source.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Classify source text for preview.
///
/// Text whose trimmed form starts with `<`, or that mentions a doctype or
/// `<html` anywhere, is markup. Everything else, including empty input, is
/// script.
pub fn classify(source: &str) -> ContentKind {
    let trimmed = trim_source(source);
    if trimmed.starts_with('<') || has_document_marker(trimmed) {
        ContentKind::HtmlFragment
    } else {
        ContentKind::ScriptSource
    }
}
