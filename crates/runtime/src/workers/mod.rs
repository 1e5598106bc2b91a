//! Worker tasks that back the runtime orchestration.

mod reconciler;

pub use reconciler::{Command, ReconcilerWorker};
