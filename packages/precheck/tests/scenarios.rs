use livepad_precheck::{precheck, validate, PrecheckError};

#[test]
fn leading_slash_is_flagged() {
    let outcome = validate("/this/is/not/valid/js();");
    let err = outcome.expect("leading slash payload should not compile");
    assert!(err.to_string().contains("Invalid regular expression flags"));
}

#[test]
fn regex_literal_is_accepted() {
    let source =
        "const r = /abc/i; document.getElementById('root').innerText = String(r.test('abc'));";
    assert_eq!(validate(source), None);
}

#[test]
fn nested_template_literals_are_accepted() {
    let source = "const name = `User`; document.getElementById('root').innerHTML = `<p>Hello ${'${name}'}</p>`;";
    assert!(precheck(source).is_ok());
}

#[test]
fn supplementary_plane_characters_are_accepted() {
    let source = "document.getElementById('root').innerText = \"Unicode: \u{1F600}\";";
    assert!(precheck(source).is_ok());
}

#[test]
fn counter_snippet_is_accepted() {
    let source = r#"const root = document.getElementById('root');
if (root) root.innerHTML = '<div style="padding:12px;font-family:system-ui,Arial"><h3>Example: Counter</h3><div id="counter">Count: 0</div><button id="inc">Inc</button></div>';
let n = 0; const btn = document.getElementById('inc'); if (btn) btn.addEventListener('click', () => { n++; const c = document.getElementById('counter'); if (c) c.textContent = 'Count: ' + n; });"#;
    assert!(precheck(source).is_ok());
}

#[test]
fn script_closing_tag_inside_string_is_just_text() {
    let source = "const s = '</script><script>alert(1)</script>'; console.log(s);";
    assert!(precheck(source).is_ok());
}

#[test]
fn runtime_errors_are_not_compile_errors() {
    // Missing globals only fail when executed
    assert!(precheck("undefinedFunction(); missing.property.chain = 1;").is_ok());
}

#[test]
fn error_reports_line_and_column() {
    let source = "const a = 1;\nconst b = (a + 2;\n";
    match validate(source) {
        Some(PrecheckError::UnexpectedEof { position, .. }) => {
            assert_eq!(position.line, 3);
        }
        other => panic!("expected end-of-input error, got {:?}", other),
    }
}

#[test]
fn validation_is_deterministic() {
    let source = "let x = (1, 2;";
    assert_eq!(validate(source), validate(source));
}
