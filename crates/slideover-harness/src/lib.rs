#![forbid(unsafe_code)]

//! Test harness for slideover.
//!
//! - [`MockViewTree`]: an in-memory [`slideover::ViewTree`] that records
//!   every call and holds animations until the test completes them.
//! - [`RecordingObserver`]: logs observer hooks in call order.
//! - [`settle`]: finish all pending animations and route the completions
//!   back into a presenter.

pub mod observer;
pub mod tree;

pub use observer::{Hook, RecordingObserver};
pub use tree::{MockView, MockViewTree, Op, OpLog, PendingAnimation, settle};
