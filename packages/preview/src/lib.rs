//! # Livepad Preview
//!
//! Drives one preview surface through refresh cycles.
//!
//! ```text
//! source ──classify/synthesize──▶ ResourceStore::create ──▶ PreviewSurface::navigate
//!                                                               │
//!              {previewReady: true} ◀── runner document ◀───────┘
//!                       │
//!                       ▼
//!   PreviewHost::handle_message ──▶ PreviewSurface::post_message({userCode})
//! ```
//!
//! The controller never executes user code; it only moves text between the
//! editor and the sandboxed runner.

pub mod controller;
pub mod handshake;
pub mod resource;
pub mod surface;

pub use controller::{
    Handshake, HandshakeOutcome, MessageOutcome, PreviewCycle, PreviewError, PreviewHost,
};
pub use handshake::{CycleId, HandshakeMessage};
pub use resource::{BlobStore, PreviewResource, ResourceError, ResourceStore, StoredDocument};
pub use surface::{DeliveryError, PreviewSurface};
