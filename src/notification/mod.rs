//! Notice composition and the fire-and-forget notification sink port.
//!
//! The core composes user-visible messages for lifecycle events and hands
//! them to a [`NotificationSink`]. Delivery transport (persistence, push,
//! websockets) is the surrounding application's concern; a sink failure
//! never aborts the state transition that triggered the notice.

mod notice;
mod sinks;

pub use notice::{Notice, NoticeCategory};
pub use sinks::{
    FailingNotificationSink, NotificationError, NotificationResult, NotificationSink,
    RecordingNotificationSink,
};
