//! Cross-module scenario tests

pub mod support;
