//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = VitgramError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum VitgramError {
    InvalidArgument(InvalidArgumentError),
    InvalidTable(InvalidTableError),
    UnknownWord(UnknownWordError),
    IOError(std::io::Error),
}

impl VitgramError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_table<S>(line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidTable(InvalidTableError {
            line,
            msg: msg.into(),
        })
    }

    pub(crate) fn unknown_word<S>(word: S) -> Self
    where
        S: Into<String>,
    {
        Self::UnknownWord(UnknownWordError { word: word.into() })
    }
}

impl fmt::Display for VitgramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => e.fmt(f),
            Self::InvalidTable(e) => e.fmt(f),
            Self::UnknownWord(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for VitgramError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when a line of a probability table cannot be interpreted.
#[derive(Debug)]
pub struct InvalidTableError {
    /// 1-based line number.
    pub(crate) line: usize,

    /// Error message.
    pub(crate) msg: String,
}

impl InvalidTableError {
    /// Returns the 1-based number of the offending line.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for InvalidTableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidTableError: line {}: {}", self.line, self.msg)
    }
}

impl Error for InvalidTableError {}

/// Error used when a sentence starts with a word missing from the probability table.
#[derive(Debug)]
pub struct UnknownWordError {
    /// The word that was looked up.
    pub(crate) word: String,
}

impl UnknownWordError {
    /// Returns the word that was not found.
    pub fn word(&self) -> &str {
        &self.word
    }
}

impl fmt::Display for UnknownWordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "UnknownWordError: sentence-initial word `{}` is not in the probability table",
            self.word
        )
    }
}

impl Error for UnknownWordError {}

impl From<std::io::Error> for VitgramError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
