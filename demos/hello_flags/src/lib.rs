//! Library facade for the `hello_flags` demo so integration tests can reuse
//! the flag definitions.

pub mod cli;
pub mod error;
