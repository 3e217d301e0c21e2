//! Diagnostic types for the parser.
//!
//! Parse failures never abort parsing. Each one is recorded as an [`Error`]
//! holding:
//!
//! - The kind of failure (lookahead mismatch, missing prefix handler,
//!   integer conversion failure)
//! - The source position of the offending token
//! - An optional tip shown by the command-line front-end

pub mod errors;
