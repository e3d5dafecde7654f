use livepad_document::{load_fixture, synthesize_with, DocumentOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct PreviewResult {
    kind: String,
    html: String,
    validation_error: Option<String>,
}

#[wasm_bindgen]
impl PreviewResult {
    /// `html` or `script`
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.kind.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn html(&self) -> String {
        self.html.clone()
    }

    /// Pre-check message for scripts; markup is never checked
    #[wasm_bindgen(getter, js_name = validationError)]
    pub fn validation_error(&self) -> Option<String> {
        self.validation_error.clone()
    }
}

/// Classify a source as `html` or `script`
#[wasm_bindgen(js_name = classify)]
pub fn classify_js(source: &str) -> String {
    livepad_document::classify(source).to_string()
}

/// Build the preview document for a source and pre-check it when it is a script
#[wasm_bindgen(js_name = preparePreview)]
pub fn prepare_preview_js(source: &str, title: Option<String>) -> PreviewResult {
    let options = DocumentOptions {
        title,
        ..Default::default()
    };
    let document = synthesize_with(source, &options);
    let validation_error = match document.kind {
        livepad_document::ContentKind::ScriptSource => {
            livepad_precheck::validate(source).map(|e| e.to_string())
        }
        livepad_document::ContentKind::HtmlFragment => None,
    };

    PreviewResult {
        kind: document.kind.to_string(),
        html: document.html,
        validation_error,
    }
}

/// Pre-check a script; returns the error message or `undefined`
#[wasm_bindgen(js_name = validate)]
pub fn validate_js(source: &str) -> Option<String> {
    livepad_precheck::validate(source).map(|e| e.to_string())
}

/// Pre-check a script and render the error with source context
#[wasm_bindgen(js_name = formatValidation)]
pub fn format_validation_js(source: &str, file_name: &str) -> Option<String> {
    livepad_precheck::validate(source)
        .map(|e| livepad_precheck::format_error(source, file_name, &e))
}

/// Wrapper script shown in the runner instead of code that failed the pre-check
#[wasm_bindgen(js_name = validationErrorScript)]
pub fn validation_error_script_js(message: &str) -> String {
    livepad_document::validation_error_script(message)
}

/// Test payload by id; unknown ids return the default example
#[wasm_bindgen(js_name = fixture)]
pub fn fixture_js(id: &str) -> String {
    load_fixture(id).source().to_string()
}

/// All fixture ids as a JSON array
#[wasm_bindgen(js_name = fixtureIds)]
pub fn fixture_ids_js() -> String {
    let ids: Vec<&str> = livepad_document::Fixture::ALL
        .iter()
        .map(|fixture| fixture.id())
        .collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}
