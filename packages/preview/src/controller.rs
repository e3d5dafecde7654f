//! # Preview Host Controller
//!
//! Owns the single live preview resource and the single outstanding
//! readiness listener of one preview surface.
//!
//! A refresh publishes a new document. Markup is terminal at that point. For
//! scripts the controller arms a one-shot listener for the new cycle *before*
//! navigating, then waits for the runner's `{previewReady: true}` and answers
//! with `{userCode}`.

use crate::handshake::{CycleId, HandshakeMessage};
use crate::resource::{PreviewResource, ResourceError, ResourceStore};
use crate::surface::PreviewSurface;
use livepad_document::{
    delivery_failure_document, synthesize_with, validation_error_script, ContentKind,
    DocumentOptions, PreviewDocument,
};
use livepad_precheck::PrecheckError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to publish preview: {0}")]
    Resource(#[from] ResourceError),
}

/// How a cycle's handshake ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandshakeOutcome {
    /// Code (or the validation wrapper) reached the runner
    Delivered,
    /// Delivery failed and the fallback document was loaded
    FellBack,
    /// A newer refresh started first
    Superseded,
    /// The controller was torn down first
    TornDown,
}

/// Result of dispatching one incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageOutcome {
    Ignored,
    Delivered,
    FellBack,
}

/// Resolves once the cycle's handshake has ended, one way or another
#[derive(Debug)]
pub struct Handshake {
    cycle: CycleId,
    receiver: oneshot::Receiver<HandshakeOutcome>,
}

impl Handshake {
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    /// Non-blocking peek; `None` while the listener is still armed
    pub fn try_outcome(&mut self) -> Option<HandshakeOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Closed) => Some(HandshakeOutcome::TornDown),
            Err(oneshot::error::TryRecvError::Empty) => None,
        }
    }
}

impl Future for Handshake {
    type Output = HandshakeOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(HandshakeOutcome::TornDown))
    }
}

/// What one `refresh` produced
#[derive(Debug)]
pub struct PreviewCycle {
    pub id: CycleId,
    pub kind: ContentKind,
    pub resource: PreviewResource,
    /// Pre-check result; always `None` for markup, which is never checked
    pub validation: Option<PrecheckError>,
    /// Present for scripts only
    pub handshake: Option<Handshake>,
}

/// The armed one-shot listener of the current cycle
struct Listener {
    cycle: CycleId,
    source: String,
    validation: Option<PrecheckError>,
    notify: oneshot::Sender<HandshakeOutcome>,
}

impl Listener {
    fn resolve(self, outcome: HandshakeOutcome) {
        // The cycle's future may have been dropped already
        let _ = self.notify.send(outcome);
    }
}

pub struct PreviewHost<R: ResourceStore, S: PreviewSurface> {
    store: R,
    surface: S,
    options: DocumentOptions,
    next_cycle: u64,
    current_cycle: Option<CycleId>,
    resource: Option<PreviewResource>,
    listener: Option<Listener>,
    validation_error: Option<String>,
}

impl<R: ResourceStore, S: PreviewSurface> PreviewHost<R, S> {
    pub fn new(store: R, surface: S) -> Self {
        Self::with_options(store, surface, DocumentOptions::default())
    }

    pub fn with_options(store: R, surface: S, options: DocumentOptions) -> Self {
        Self {
            store,
            surface,
            options,
            next_cycle: 1,
            current_cycle: None,
            resource: None,
            listener: None,
            validation_error: None,
        }
    }

    /// Publish `source` as the new preview
    pub fn refresh(&mut self, source: &str) -> Result<PreviewCycle, PreviewError> {
        self.set_validation_error(None);

        if let Some(listener) = self.listener.take() {
            debug!(cycle = %listener.cycle, "superseding pending handshake");
            listener.resolve(HandshakeOutcome::Superseded);
        }

        let cycle = CycleId(self.next_cycle);
        self.next_cycle += 1;
        self.current_cycle = Some(cycle);

        let document = synthesize_with(source, &self.options);
        let kind = document.kind;
        let resource = self.replace_resource(&document)?;
        debug!(cycle = %cycle, kind = %kind, url = %resource.url, "preview resource created");

        match kind {
            ContentKind::HtmlFragment => {
                self.surface.navigate(cycle, &resource);
                Ok(PreviewCycle {
                    id: cycle,
                    kind,
                    resource,
                    validation: None,
                    handshake: None,
                })
            }
            ContentKind::ScriptSource => {
                let validation = livepad_precheck::validate(source);
                if let Some(error) = &validation {
                    debug!(cycle = %cycle, error = %error, "pre-check failed");
                }

                let (notify, receiver) = oneshot::channel();
                self.listener = Some(Listener {
                    cycle,
                    source: source.to_string(),
                    validation: validation.clone(),
                    notify,
                });

                // The runner may signal readiness as soon as it loads
                self.surface.navigate(cycle, &resource);

                Ok(PreviewCycle {
                    id: cycle,
                    kind,
                    resource,
                    validation,
                    handshake: Some(Handshake { cycle, receiver }),
                })
            }
        }
    }

    /// Dispatch a message from the hosted frame to the armed listener
    pub fn handle_message(&mut self, data: &Value) -> MessageOutcome {
        if !is_ready_signal(data) {
            return MessageOutcome::Ignored;
        }
        match self.listener.take() {
            Some(listener) => self.deliver(listener),
            None => {
                debug!("readiness signal without an armed listener");
                MessageOutcome::Ignored
            }
        }
    }

    /// Like [`handle_message`](Self::handle_message), but only for `cycle`
    pub fn handle_message_for(&mut self, cycle: CycleId, data: &Value) -> MessageOutcome {
        if !is_ready_signal(data) {
            return MessageOutcome::Ignored;
        }
        match self.listener.take() {
            Some(listener) if listener.cycle == cycle => self.deliver(listener),
            Some(listener) => {
                debug!(cycle = %cycle, armed = %listener.cycle, "ignoring stale readiness signal");
                self.listener = Some(listener);
                MessageOutcome::Ignored
            }
            None => MessageOutcome::Ignored,
        }
    }

    /// Cancel the listener and release the live resource
    pub fn teardown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.resolve(HandshakeOutcome::TornDown);
        }
        self.release_resource();
        self.current_cycle = None;
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn current_resource(&self) -> Option<&PreviewResource> {
        self.resource.as_ref()
    }

    pub fn current_cycle(&self) -> Option<CycleId> {
        self.current_cycle
    }

    pub fn has_pending_handshake(&self) -> bool {
        self.listener.is_some()
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn deliver(&mut self, listener: Listener) -> MessageOutcome {
        let Listener {
            cycle,
            source,
            validation,
            notify,
        } = listener;

        let code = match validation {
            Some(error) => {
                let message = error.to_string();
                let script = validation_error_script(&message);
                self.set_validation_error(Some(message));
                script
            }
            None => source,
        };

        let outcome = match self
            .surface
            .post_message(cycle, &HandshakeMessage::UserCode(code))
        {
            Ok(()) => {
                debug!(cycle = %cycle, "code delivered to runner");
                (MessageOutcome::Delivered, HandshakeOutcome::Delivered)
            }
            Err(error) => {
                warn!(cycle = %cycle, error = %error, "delivery failed, loading fallback document");
                self.load_fallback(cycle);
                (MessageOutcome::FellBack, HandshakeOutcome::FellBack)
            }
        };

        let _ = notify.send(outcome.1);
        outcome.0
    }

    fn load_fallback(&mut self, cycle: CycleId) {
        let document = PreviewDocument::new(ContentKind::HtmlFragment, delivery_failure_document());
        match self.replace_resource(&document) {
            Ok(resource) => self.surface.navigate(cycle, &resource),
            Err(error) => warn!(cycle = %cycle, error = %error, "could not publish fallback document"),
        }
    }

    fn replace_resource(
        &mut self,
        document: &PreviewDocument,
    ) -> Result<PreviewResource, ResourceError> {
        self.release_resource();
        let resource = self.store.create(document)?;
        self.resource = Some(resource.clone());
        Ok(resource)
    }

    fn release_resource(&mut self) {
        if let Some(resource) = self.resource.take() {
            if let Err(error) = self.store.revoke(&resource) {
                warn!(url = %resource.url, error = %error, "failed to release preview resource");
            }
        }
    }

    fn set_validation_error(&mut self, error: Option<String>) {
        self.validation_error = error;
        self.surface
            .validation_changed(self.validation_error.as_deref());
    }
}

impl<R: ResourceStore, S: PreviewSurface> Drop for PreviewHost<R, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn is_ready_signal(data: &Value) -> bool {
    HandshakeMessage::from_value(data).is_some_and(|message| message.is_ready())
}
