//! Main error type from reading a document into a dialogue graph.

use std::{error::Error, fmt};

use crate::error::{build::BuildError, parse::ParseError};

#[derive(Clone, Debug)]
/// Errors from reading a dialogue document.
pub enum ReadError {
    /// Could not parse the template markup.
    Parse(ParseError),
    /// Could not build the dialogue graph from the parsed components.
    Build(BuildError),
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::Parse(err) => Some(err),
            ReadError::Build(err) => Some(err),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadError::Parse(err) => write!(f, "{}", err),
            ReadError::Build(err) => write!(f, "{}", err),
        }
    }
}

impl_from_error![
    ReadError;
    [Parse, ParseError],
    [Build, BuildError]
];
