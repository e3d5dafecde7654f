use livepad_document::{classify, ContentKind};
use livepad_generator::{Generator, StubGenerator};
use std::sync::Arc;
use std::time::Duration;

fn stub() -> Arc<dyn Generator> {
    Arc::new(StubGenerator::new(Duration::ZERO))
}

#[tokio::test]
async fn test_generated_snippet_is_previewable_script() {
    let code = stub().generate("Test").await.unwrap();
    assert_eq!(classify(&code), ContentKind::ScriptSource);
    assert_eq!(livepad_precheck::validate(&code), None);
}

#[tokio::test]
async fn test_hostile_prompts_stay_inert() {
    let prompts = [
        "</script><script>alert(1)</script>",
        "it's a \"quoted\" `template` ${x}",
        "line\nbreak\r\nand\u{2028}separators\u{2029}",
        "emoji \u{1F600} and \u{4E2D}\u{6587}",
        "*/ /* // \\",
    ];
    for prompt in prompts {
        let code = stub().generate(prompt).await.unwrap();
        assert!(!code.contains('<'), "{}", prompt);
        assert!(!code.contains('\u{2028}'), "{}", prompt);
        assert_eq!(livepad_precheck::validate(&code), None, "{}", prompt);
    }
}
