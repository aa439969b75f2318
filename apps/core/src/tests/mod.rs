//! Test Module
//!
//! Crate-level tests run against the built-in knowledge base.
//!
//! ## Test Categories
//! - `brain_tests`: Turn resolution over the real catalog and FAQ set
//! - `integration_tests`: Loading, configuration, and full paced sessions
