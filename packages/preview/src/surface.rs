use crate::handshake::{CycleId, HandshakeMessage};
use crate::resource::PreviewResource;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Preview surface is closed")]
    Closed,

    #[error("Could not deliver message: {0}")]
    Failed(String),
}

/// The place a preview is shown: a frame, a browser tab, a test double.
pub trait PreviewSurface {
    /// Point the surface at a new resource
    fn navigate(&mut self, cycle: CycleId, resource: &PreviewResource);

    /// Send a handshake message to the hosted document
    fn post_message(
        &mut self,
        cycle: CycleId,
        message: &HandshakeMessage,
    ) -> Result<(), DeliveryError>;

    /// The validation error shown next to the editor changed
    fn validation_changed(&mut self, _error: Option<&str>) {}
}
