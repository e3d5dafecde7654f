use crate::classifier::{classify, trim_source, ContentKind};
use serde::{Deserialize, Serialize};

/// Options for preview document synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOptions {
    /// Declared document charset
    pub charset: String,
    /// Content of the viewport meta tag
    pub viewport: String,
    /// Optional `<title>`; omitted when `None`
    pub title: Option<String>,
    /// Text shown in the runner's root element until code arrives
    pub placeholder: String,
    /// Pretty print the generated shell
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            charset: "utf-8".to_string(),
            viewport: "width=device-width,initial-scale=1".to_string(),
            title: None,
            placeholder: "Waiting for code...".to_string(),
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// A complete, self-contained preview document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewDocument {
    pub kind: ContentKind,
    pub html: String,
}

impl PreviewDocument {
    pub const CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

    pub fn new(kind: ContentKind, html: String) -> Self {
        Self { kind, html }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Id of the element the runner renders into
pub const ROOT_ELEMENT_ID: &str = "root";

/// Bootstrap script of the runner document.
///
/// Executes received `userCode` with indirect eval so it runs in the frame's
/// global scope. Errors stay inside the frame.
const RUNNER_BOOTSTRAP: &str = r#"(function () {
  var root = document.getElementById('root');
  function displayError(message) {
    if (root) root.textContent = 'Preview error: ' + message;
  }
  window.addEventListener('message', function (event) {
    var data = event.data;
    if (!data || typeof data.userCode !== 'string') return;
    try {
      if (root) root.innerHTML = '';
      (0, eval)(data.userCode);
    } catch (err) {
      console.error('User code execution error', err);
      displayError(err && err.message ? err.message : String(err));
    }
  });
  try {
    window.parent.postMessage({ previewReady: true }, '*');
  } catch (e) {}
})();"#;

const DELIVERY_FAILURE_MESSAGE: &str = "Preview error: could not deliver code to runner";

struct Context<'a> {
    options: &'a DocumentOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a DocumentOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    /// Verbatim content: never indented, so `<pre>` blocks and scripts survive
    fn add_raw_block(&mut self, text: &str) {
        self.add(text);
        if self.options.pretty && !text.ends_with('\n') {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Classify and synthesize with default options
pub fn synthesize(source: &str) -> PreviewDocument {
    synthesize_with(source, &DocumentOptions::default())
}

/// Classify `source` and build the matching preview document.
///
/// Script sources get the runner shell; the code itself travels through the
/// handshake and is never embedded in the document.
pub fn synthesize_with(source: &str, options: &DocumentOptions) -> PreviewDocument {
    match classify(source) {
        ContentKind::HtmlFragment => {
            PreviewDocument::new(ContentKind::HtmlFragment, html_document(source, options))
        }
        ContentKind::ScriptSource => {
            PreviewDocument::new(ContentKind::ScriptSource, runner_document(options))
        }
    }
}

/// Build the document for an HTML source.
///
/// Full documents (leading `<!` or an `<html` tag) are used verbatim; anything
/// else is placed into the body of a minimal shell.
pub fn html_document(source: &str, options: &DocumentOptions) -> String {
    let trimmed = trim_source(source);
    if trimmed.starts_with("<!") || has_html_tag(trimmed) {
        return trimmed.to_string();
    }

    let mut ctx = Context::new(options);
    open_document(&mut ctx);

    ctx.add_line("<body>");
    ctx.add_raw_block(trimmed);
    ctx.add_line("</body>");

    close_document(&mut ctx);
    ctx.get_output()
}

fn has_html_tag(text: &str) -> bool {
    text.to_ascii_lowercase().contains("<html")
}

/// Build the runner document that receives code over the handshake
pub fn runner_document(options: &DocumentOptions) -> String {
    let mut ctx = Context::new(options);
    open_document(&mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(&format!(
        "<div id=\"{}\">{}</div>",
        ROOT_ELEMENT_ID,
        escape_html(&options.placeholder)
    ));
    ctx.add_line("<script>");
    ctx.add_raw_block(RUNNER_BOOTSTRAP);
    ctx.add_line("</script>");
    ctx.dedent();
    ctx.add_line("</body>");

    close_document(&mut ctx);
    ctx.get_output()
}

fn open_document(ctx: &mut Context) {
    ctx.add_line("<!doctype html>");
    ctx.add_line("<html>");
    ctx.add_line("<head>");
    ctx.indent();
    let charset = escape_attribute(&ctx.options.charset);
    ctx.add_line(&format!("<meta charset=\"{}\">", charset));
    let viewport = escape_attribute(&ctx.options.viewport);
    ctx.add_line(&format!("<meta name=\"viewport\" content=\"{}\">", viewport));
    if let Some(title) = ctx.options.title.clone() {
        ctx.add_line(&format!("<title>{}</title>", escape_html(&title)));
    }
    ctx.dedent();
    ctx.add_line("</head>");
}

fn close_document(ctx: &mut Context) {
    ctx.add_line("</html>");
}

/// Script delivered instead of user code when the pre-check fails.
///
/// Shows the message inside the runner's root element.
pub fn validation_error_script(message: &str) -> String {
    let literal = js_string_literal(message);
    format!(
        "// Validation failed in parent: {literal}\n\
         (function () {{\n\
         \x20 var root = document.getElementById('{ROOT_ELEMENT_ID}');\n\
         \x20 if (root) root.textContent = 'Preview error (invalid JS): ' + {literal};\n\
         }})();"
    )
}

/// Static document loaded when code could not be delivered to the runner
pub fn delivery_failure_document() -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"></head><body><div>{}</div></body></html>",
        DELIVERY_FAILURE_MESSAGE
    )
}

/// Encode `text` as a JavaScript string literal that is safe to place inside
/// an inline `<script>`: `<` and the U+2028/U+2029 separators are escaped.
pub fn js_string_literal(text: &str) -> String {
    let json = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    json.replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
