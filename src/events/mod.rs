//! Outbound notifications for renderers and audio.
//!
//! After each inbound operation a collaborator can:
//! - take the [`DirtyFlags`] to learn what needs redrawing
//! - drain the [`GameEvent`] stream, or subscribe an [`EventSink`] that
//!   receives the same events as they are flushed

mod dirty;
mod event;

pub use dirty::DirtyFlags;
pub use event::{EventSink, GameEvent};
