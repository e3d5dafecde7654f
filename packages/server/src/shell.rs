//! The browser app shell: editor, prompt box, fixture buttons and the
//! sandboxed preview frame.

use livepad_document::{escape_html, Fixture, INITIAL_SOURCE};

const SHELL_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>Livepad</title>
  <style>
    body { margin: 0; font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial; display: flex; height: 100vh; }
    .pane { flex: 1; display: flex; flex-direction: column; padding: 12px; gap: 8px; min-width: 0; }
    textarea { flex: 1; font-family: ui-monospace, Menlo, Consolas, monospace; font-size: 13px; }
    iframe { flex: 1; border: 1px solid #ccc; background: #fff; }
    .row { display: flex; gap: 6px; flex-wrap: wrap; }
    #validation { color: #b00020; white-space: pre-wrap; font-family: ui-monospace, monospace; }
  </style>
</head>
<body>
  <div class="pane">
    <div class="row">
      <input id="prompt" size="48" value="Create a simple counter that increments on button click">
      <button id="generate">Generate</button>
    </div>
    <textarea id="editor" spellcheck="false">{{INITIAL_SOURCE}}</textarea>
    <div class="row">
      <button id="run">Update preview</button>
      <button data-fixture="normal">Example</button>
      {{FIXTURE_BUTTONS}}
    </div>
    <div id="validation" hidden></div>
  </div>
  <div class="pane">
    <iframe id="preview" sandbox="allow-scripts" title="Preview"></iframe>
  </div>
<script>
(function () {
  var frame = document.getElementById('preview');
  var editor = document.getElementById('editor');
  var validation = document.getElementById('validation');
  var currentCycle = null;
  var headers = { 'Content-Type': 'application/json' };

  function refresh(code) {
    return fetch('/api/refresh', { method: 'POST', headers: headers, body: JSON.stringify({ code: code }) })
      .catch(function (err) { console.error('refresh failed', err); });
  }

  var events = new EventSource('/api/events');
  var opened = false;
  events.onopen = function () {
    if (opened) return;
    opened = true;
    refresh(editor.value);
  };
  events.addEventListener('navigate', function (ev) {
    var data = JSON.parse(ev.data);
    currentCycle = data.cycle;
    frame.src = data.url;
  });
  events.addEventListener('post', function (ev) {
    var data = JSON.parse(ev.data);
    if (data.cycle !== currentCycle || !frame.contentWindow) return;
    frame.contentWindow.postMessage(data.message, '*');
  });
  events.addEventListener('validation', function (ev) {
    var data = JSON.parse(ev.data);
    validation.textContent = data.error || '';
    validation.hidden = !data.error;
  });

  window.addEventListener('message', function (ev) {
    if (ev.source !== frame.contentWindow) return;
    fetch('/api/message', { method: 'POST', headers: headers, body: JSON.stringify({ cycle: currentCycle, data: ev.data }) });
  });

  document.getElementById('run').addEventListener('click', function () { refresh(editor.value); });
  editor.addEventListener('keydown', function (ev) {
    if (ev.key === 'Enter' && (ev.ctrlKey || ev.metaKey)) { ev.preventDefault(); refresh(editor.value); }
  });

  document.querySelectorAll('[data-fixture]').forEach(function (button) {
    button.addEventListener('click', function () {
      fetch('/api/fixtures/' + encodeURIComponent(button.dataset.fixture))
        .then(function (res) { return res.json(); })
        .then(function (fixture) { editor.value = fixture.code; refresh(fixture.code); });
    });
  });

  var generate = document.getElementById('generate');
  generate.addEventListener('click', function () {
    generate.disabled = true;
    fetch('/api/generate', { method: 'POST', headers: headers, body: JSON.stringify({ prompt: document.getElementById('prompt').value }) })
      .then(function (res) {
        return res.json().then(function (body) {
          if (!res.ok) throw new Error(body.error || res.statusText);
          return body;
        });
      })
      .then(function (body) {
        var code = body.code || '// no code returned';
        editor.value = code;
        refresh(code);
      })
      .catch(function (err) { alert('Generation failed: ' + (err.message || err)); })
      .finally(function () { generate.disabled = false; });
  });
})();
</script>
</body>
</html>
"#;

fn fixture_buttons() -> String {
    Fixture::ALL
        .iter()
        .filter(|fixture| !matches!(fixture, Fixture::Normal | Fixture::Default))
        .map(|fixture| {
            format!(
                "<button data-fixture=\"{}\" title=\"{}\">{}</button>",
                fixture.id(),
                escape_html(fixture.description()),
                fixture.id()
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

/// Render the app shell page
pub fn page() -> String {
    SHELL_TEMPLATE
        .replace("{{FIXTURE_BUTTONS}}", &fixture_buttons())
        .replace("{{INITIAL_SOURCE}}", &escape_html(INITIAL_SOURCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_sandboxed_frame() {
        let html = page();
        assert!(html.contains("<iframe id=\"preview\" sandbox=\"allow-scripts\""));
        assert!(!html.contains("allow-same-origin"));
    }

    #[test]
    fn test_initial_source_is_escaped_into_editor() {
        let html = page();
        assert!(html.contains("// Manual preview snippet"));
        assert!(html.contains("&lt;h3&gt;Manual preview&lt;/h3&gt;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_every_fixture_has_a_button() {
        let html = page();
        for id in ["leading-slash", "regex-literal", "contains-script", "backticks", "long-unicode"] {
            assert!(html.contains(&format!("data-fixture=\"{}\"", id)), "{}", id);
        }
    }
}
