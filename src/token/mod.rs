//! Tokenization of raw template invocations.

mod scanner;
mod token;

pub use scanner::scan_template;
pub(crate) use scanner::scan_nested_spans;
pub use token::{Parameter, Token};
