//! Utilities shared by every layer of the parser.
pub mod unit;
