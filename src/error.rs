use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while driving a gnuplot process
#[derive(Debug, Error)]
pub enum Error {
    /// The external program could not be started
    #[error("Failed to launch {program:?}: {inner}")]
    Launch {
        /// The program that was spawned
        program: PathBuf,
        /// Why spawning failed
        #[source]
        inner: io::Error,
    },

    /// Numeric samples were given where gnuplot text is required
    #[error("Expected text for {argument}, got numeric samples")]
    TypeMismatch {
        /// Name or position of the offending argument
        argument: String,
    },

    /// The data columns of an array-style plot have different lengths
    #[error("Data columns have different lengths: {lengths:?}")]
    ShapeMismatch {
        /// Length of every column, in order
        lengths: Vec<usize>,
    },

    /// An array-style plot is missing one of its coordinates
    #[error("Array-style plot is missing the `{0}` coordinate")]
    MissingCoordinate(&'static str),

    /// The figure was already closed
    #[error("Figure has been closed")]
    Closed,

    /// A temporary data file could not be written
    #[error("Failed to access data file {path:?}: {inner}")]
    DataFile {
        /// Location of the file (the temporary directory if creation failed)
        path: PathBuf,
        /// The underlying failure
        #[source]
        inner: io::Error,
    },

    /// Writing to the gnuplot pipe failed
    #[error("Failed to write to gnuplot: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias
pub type Result<T> = ::std::result::Result<T, Error>;
