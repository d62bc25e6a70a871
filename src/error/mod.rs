//! Errors from parsing templates or building dialogue graphs.

#[macro_use]
mod utils;
mod build;
mod error;
mod parse;

pub use build::BuildError;
pub use error::ReadError;
pub use parse::{
    ExpandError, ExpandErrorKind, ParseError, TokenizeError, TokenizeErrorKind,
};
