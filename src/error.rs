use std::error;
use std::fmt;
use std::result;

/// Errors surfaced by the trees in this crate.
///
/// All of them are local signals: nothing is retried and nothing is transient. Each variant
/// carries a short description of the operation that failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A `VertexId` that does not address a live vertex of the tree.
    InvalidArgument(&'static str),
    /// Navigation to an absent root, parent or child.
    NotFound(&'static str),
    /// A structural primitive that the tree manages on its own, such as a rotation on a
    /// self-balancing tree.
    UnsupportedOperation(&'static str),
    /// An operation whose precondition on the state of the tree does not hold.
    IllegalState(&'static str),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    fn message(&self) -> &'static str {
        match self {
            Error::InvalidArgument(message)
            | Error::NotFound(message)
            | Error::UnsupportedOperation(message)
            | Error::IllegalState(message) => message,
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            Error::InvalidArgument(_) => "invalid argument",
            Error::NotFound(_) => "not found",
            Error::UnsupportedOperation(_) => "unsupported operation",
            Error::IllegalState(_) => "illegal state",
        };
        write!(f, "{}: {}", kind, self.message())
    }
}
