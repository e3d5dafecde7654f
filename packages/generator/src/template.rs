//! The counter-demo snippet produced by the offline generator

use livepad_document::js_string_literal;

/// Escape a prompt for embedding in the generated snippet.
///
/// `<` becomes `&lt;` and the line/paragraph separators become their JS
/// escape sequences. Nothing else is touched.
pub fn escape_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    for c in prompt.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

fn preview_markup(escaped_prompt: &str) -> String {
    format!(
        concat!(
            "<div style=\"font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial;padding:16px\">",
            "<h3 class='text-lg font-semibold mb-2'>Generated preview</h3>",
            "<p>{}</p>",
            "<div id=\"counter\" class=\"mt-3 mb-2\">Count: 0</div>",
            "<button id=\"inc\" class=\"px-3 py-1 bg-sky-600 text-white rounded\">Inc</button>",
            "</div>"
        ),
        escaped_prompt
    )
}

/// Render the counter snippet for `prompt`
pub fn render_snippet(prompt: &str) -> String {
    let escaped = escape_prompt(prompt);
    let comment: String = escaped
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let markup = js_string_literal(&preview_markup(&escaped));

    format!(
        "// Generated snippet for prompt:\n\
         // {comment}\n\
         (function(){{\n\
         \x20 const root = document.getElementById('root');\n\
         \x20 if (!root) return;\n\
         \x20 root.innerHTML = {markup};\n\
         \x20 let n = 0;\n\
         \x20 const btn = document.getElementById('inc');\n\
         \x20 if (btn) btn.addEventListener('click', function(){{ n++; const c = document.getElementById('counter'); if (c) c.textContent = 'Count: ' + n; }});\n\
         }})();"
    )
}
