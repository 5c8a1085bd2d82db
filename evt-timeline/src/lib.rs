//! EVT Timeline Library
//!
//! This library lays out the commands of an EVT event on a frame timeline:
//! each command is classified into one of a fixed set of categories by its
//! code, and commands sharing a start frame within a category are stacked in
//! source order.

pub mod category;
pub mod classify;
pub mod command;
pub mod frame;
pub mod session;
pub mod timeline;

pub use category::{Category, CATEGORY_COUNT, CATEGORY_NAMES};
pub use classify::{classify, AUDIO_CATEGORY, OTHER_CATEGORY};
pub use command::TimelineCommand;
pub use frame::Frame;
pub use session::{ActiveCommand, Session, SessionOptions};
pub use timeline::{Timeline, TimelineChange};

/// Result type for evt-timeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for evt-timeline operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("EVT core error: {0}")]
    Core(#[from] evt_core::Error),

    #[error("No command is open for editing")]
    NoActiveCommand,
}
