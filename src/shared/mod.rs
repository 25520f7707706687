//! Host threading and liveness
//!
//! This module provides the UI-affine job queue results are delivered
//! through, and the traits a host implements so tasks can check whether
//! their destination is still alive.

pub mod dispatcher;
pub mod host;

pub use dispatcher::{DispatchError, UiHandle, UiJob, UiLoop};
pub use host::{HostActivity, HostContext, LocalActivity, LocalContext};
