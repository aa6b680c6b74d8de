//! Subtrack Renewal Reminder Engine
//!
//! Decides, for every active subscription and owner, whether a renewal
//! reminder should go out today, composes its content, and suppresses
//! duplicates against a notification history. The engine is pure and
//! synchronous; storage and delivery belong to the caller.

pub mod batch;
pub mod compose;
pub mod engine;
pub mod error;
pub mod event;
pub mod policy;
pub mod suppress;
pub mod window;

pub use batch::{run_pass, InMemoryDirectory, OwnerDirectory, PassOutcome};
pub use compose::{compose, ReminderMessage};
pub use engine::evaluate;
pub use error::{ReminderError, ReminderResult};
pub use event::{ReminderCandidate, ReminderEvent};
pub use policy::is_window_allowed;
pub use suppress::{should_emit, EmissionKey, InMemoryHistory, NotificationHistory};
pub use window::{classify_offset, ReminderWindow};
