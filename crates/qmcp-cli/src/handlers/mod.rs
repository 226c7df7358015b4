//! Command handlers.
//!
//! Each handler takes the composed [`CliContext`](crate::CliContext) and
//! writes its result to stdout; nothing else in the CLI prints.

pub mod call;
pub mod serve;
pub mod tools;
