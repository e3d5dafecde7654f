use livepad_document::{ContentKind, Fixture};
use livepad_preview::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Surface that forwards navigations to a channel, like a real frame would
struct ChannelSurface {
    navigations: mpsc::UnboundedSender<(CycleId, String)>,
    delivered: Arc<Mutex<Vec<String>>>,
}

impl PreviewSurface for ChannelSurface {
    fn navigate(&mut self, cycle: CycleId, resource: &PreviewResource) {
        let _ = self.navigations.send((cycle, resource.url.clone()));
    }

    fn post_message(
        &mut self,
        _cycle: CycleId,
        message: &HandshakeMessage,
    ) -> Result<(), DeliveryError> {
        let code = message
            .user_code()
            .ok_or_else(|| DeliveryError::Failed("expected userCode".to_string()))?;
        self.delivered.lock().unwrap().push(code.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_handshake_future_resolves_after_ready_signal() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::new(BlobStore::new("http://localhost/preview"));
    let host = Arc::new(tokio::sync::Mutex::new(PreviewHost::new(
        store.clone(),
        ChannelSurface {
            navigations: tx,
            delivered: delivered.clone(),
        },
    )));

    let cycle = host
        .lock()
        .await
        .refresh(Fixture::RegexLiteral.source())
        .unwrap();
    assert_eq!(cycle.kind, ContentKind::ScriptSource);
    assert!(cycle.validation.is_none());

    // Simulated runner: loads the document and signals readiness
    let runner_host = host.clone();
    let runner_store = store.clone();
    let runner = tokio::spawn(async move {
        let (cycle, url) = rx.recv().await.unwrap();
        let id: u64 = url.rsplit('/').next().unwrap().parse().unwrap();
        let page = runner_store.get(id).unwrap();
        assert!(page.body.contains("previewReady"));
        runner_host
            .lock()
            .await
            .handle_message_for(cycle, &json!({ "previewReady": true }))
    });

    let outcome = cycle.handshake.unwrap().await;
    assert_eq!(outcome, HandshakeOutcome::Delivered);
    assert_eq!(runner.await.unwrap(), MessageOutcome::Delivered);
    assert_eq!(
        *delivered.lock().unwrap(),
        vec![Fixture::RegexLiteral.source().to_string()]
    );
}

#[tokio::test]
async fn test_dropping_host_resolves_handshake_as_torn_down() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let store = Arc::new(BlobStore::default());
    let mut host = PreviewHost::new(
        store.clone(),
        ChannelSurface {
            navigations: tx,
            delivered: Arc::default(),
        },
    );

    let cycle = host.refresh("console.log('hi')").unwrap();
    drop(host);

    assert_eq!(cycle.handshake.unwrap().await, HandshakeOutcome::TornDown);
    assert_eq!(store.live_count(), 0);
}

#[tokio::test]
async fn test_every_fixture_completes_a_cycle() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::new(BlobStore::default());
    let mut host = PreviewHost::new(
        store.clone(),
        ChannelSurface {
            navigations: tx,
            delivered: delivered.clone(),
        },
    );

    for fixture in Fixture::ALL {
        let cycle = host.refresh(fixture.source()).unwrap();
        let outcome = host.handle_message_for(cycle.id, &json!({ "previewReady": true }));
        match cycle.kind {
            ContentKind::HtmlFragment => assert_eq!(outcome, MessageOutcome::Ignored),
            ContentKind::ScriptSource => {
                assert_eq!(outcome, MessageOutcome::Delivered);
                assert_eq!(cycle.handshake.unwrap().await, HandshakeOutcome::Delivered);
            }
        }
        assert_eq!(store.live_count(), 1);
    }

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), Fixture::ALL.len() - 1);
    assert!(delivered[0].contains("Preview error (invalid JS): "));
}
