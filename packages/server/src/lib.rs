//! # Livepad Server
//!
//! Hosts the app shell and acts as the parent side of the preview
//! handshake. The browser shell is a thin relay: it follows `navigate`
//! events with its iframe, forwards `post` events into the frame and sends
//! the frame's messages back to `/api/message`.

pub mod app;
pub mod sse_surface;
pub mod shell;

pub use app::{router, AppState};
pub use sse_surface::{SseSurface, SurfaceEvent};
