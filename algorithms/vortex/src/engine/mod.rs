//! Execution Engine
//!
//! CPU capability detection and tier dispatch.

pub mod dispatcher;

pub use dispatcher::{get_active_backend_name, Tier};
