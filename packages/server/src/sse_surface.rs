//! Preview surface backed by a broadcast channel.
//!
//! Every event is streamed to connected app shells over SSE. The shell moves
//! its iframe on `navigate` and forwards `post` payloads to the frame.

use livepad_preview::{CycleId, DeliveryError, HandshakeMessage, PreviewResource, PreviewSurface};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    Navigate {
        cycle: CycleId,
        url: String,
    },
    Post {
        cycle: CycleId,
        message: HandshakeMessage,
    },
    Validation {
        error: Option<String>,
    },
}

impl SurfaceEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceEvent::Navigate { .. } => "navigate",
            SurfaceEvent::Post { .. } => "post",
            SurfaceEvent::Validation { .. } => "validation",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SseSurface {
    sender: broadcast::Sender<SurfaceEvent>,
}

impl SseSurface {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent> {
        self.sender.subscribe()
    }

    pub fn sender(&self) -> broadcast::Sender<SurfaceEvent> {
        self.sender.clone()
    }
}

impl Default for SseSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSurface for SseSurface {
    fn navigate(&mut self, cycle: CycleId, resource: &PreviewResource) {
        let event = SurfaceEvent::Navigate {
            cycle,
            url: resource.url.clone(),
        };
        if self.sender.send(event).is_err() {
            debug!(cycle = %cycle, "no shell connected, navigation dropped");
        }
    }

    fn post_message(
        &mut self,
        cycle: CycleId,
        message: &HandshakeMessage,
    ) -> Result<(), DeliveryError> {
        self.sender
            .send(SurfaceEvent::Post {
                cycle,
                message: message.clone(),
            })
            .map(|_| ())
            .map_err(|_| DeliveryError::Closed)
    }

    fn validation_changed(&mut self, error: Option<&str>) {
        let _ = self.sender.send(SurfaceEvent::Validation {
            error: error.map(str::to_string),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_without_subscribers_fails() {
        let mut surface = SseSurface::new();
        let result = surface.post_message(CycleId(1), &HandshakeMessage::UserCode("x".into()));
        assert_eq!(result, Err(DeliveryError::Closed));
    }

    #[test]
    fn test_events_reach_subscribers() {
        let mut surface = SseSurface::new();
        let mut rx = surface.subscribe();
        let resource = PreviewResource {
            id: 3,
            url: "/preview/3".to_string(),
        };
        surface.navigate(CycleId(1), &resource);
        surface.validation_changed(Some("bad"));

        assert_eq!(
            rx.try_recv().unwrap(),
            SurfaceEvent::Navigate {
                cycle: CycleId(1),
                url: "/preview/3".to_string()
            }
        );
        assert_eq!(rx.try_recv().unwrap().name(), "validation");
    }

    #[test]
    fn test_event_wire_shape() {
        let event = SurfaceEvent::Post {
            cycle: CycleId(7),
            message: HandshakeMessage::UserCode("run()".into()),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({ "type": "post", "cycle": 7, "message": { "userCode": "run()" } })
        );
    }
}
