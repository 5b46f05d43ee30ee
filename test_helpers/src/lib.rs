//! Test helpers shared across crates.
//!
//! This crate currently provides process environment guards for tests that
//! resolve flags against the live environment.

pub mod env;
