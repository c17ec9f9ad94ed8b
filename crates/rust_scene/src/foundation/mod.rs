//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Handle-keyed collections
//! - Deferred values and the loader task queue
//! - Clocks
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod deferred;
pub mod time;
pub mod logging;
