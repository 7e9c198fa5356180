//! The crate-wide error type.

/// Errors reported by the grid store and the search lifecycle.
///
/// All variants are recoverable: the caller can fix the condition (place a
/// missing marker, correct an option string) and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Coordinates outside `[0, width) x [0, height)`.
    #[error("coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// No start marker on the grid when seeding a search.
    #[error("no start cell on the grid")]
    NoStart,

    /// No destination marker on the grid when seeding a search.
    #[error("no destination cell on the grid")]
    NoDestination,

    /// An option string (tile name, heuristic name, ...) did not parse.
    #[error("unknown {name} {value:?}")]
    UnknownOption {
        name: &'static str,
        value: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
