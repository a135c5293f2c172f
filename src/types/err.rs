/*!
Error types used in the library.

Names of the error enums overlap with the subsystem they describe, following
the same convention as the rest of the library. A single top-level
[ErrorKind] unions every subsystem's error, with a `From` impl per variant so
`?` composes across module boundaries.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error parsing a DIMACS file.
    Parse(ParseError),

    /// An error from the watched-literals engine.
    Watch(WatchError),

    /// An error in elimination configuration.
    Config(ConfigError),

    /// An I/O failure. `std::io::Error` does not implement `PartialEq`, so
    /// only the formatted message is retained.
    Io(String),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl From<WatchError> for ErrorKind {
    fn from(e: WatchError) -> Self {
        ErrorKind::Watch(e)
    }
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.to_string())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "parse error: {e}"),
            ErrorKind::Watch(e) => write!(f, "watched-literals error: {e}"),
            ErrorKind::Config(e) => write!(f, "configuration error: {e}"),
            ErrorKind::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// An error parsing a DIMACS CNF file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The `p cnf <vars> <clauses>` header is missing.
    MissingHeader,

    /// The header line could not be parsed.
    MalformedHeader { line: usize },

    /// A clause line contained a token that was not an integer.
    MalformedClause { line: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingHeader => write!(f, "missing 'p cnf' header"),
            ParseError::MalformedHeader { line } => write!(f, "malformed header at line {line}"),
            ParseError::MalformedClause { line } => write!(f, "malformed clause at line {line}"),
        }
    }
}

/// An invariant violation in the watched-literals engine. These indicate a
/// programming error in the caller (e.g. assigning an already-assigned
/// variable, or backtracking past the base level) rather than a condition
/// the engine can recover from, and are intended to be unwrapped/panicked on
/// by callers rather than handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchError {
    /// A literal was assigned whose variable already has a value.
    AlreadyAssigned,

    /// Requested more backtrack levels than exist.
    BacktrackUnderflow,

    /// `change_active_clauses` was called above the base decision level.
    NotAtBaseLevel,
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::AlreadyAssigned => write!(f, "variable already assigned"),
            WatchError::BacktrackUnderflow => write!(f, "not enough decision levels to backtrack"),
            WatchError::NotAtBaseLevel => write!(f, "active clauses may only change at the base level"),
        }
    }
}

/// A conflict in elimination configuration, caught before the core runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// `min_var > max_var` in a range-scoped heuristic.
    EmptyVariableRange,

    /// A zero capacity was requested for an LRU cache.
    ZeroCacheCapacity,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyVariableRange => write!(f, "minimum variable exceeds maximum variable"),
            ConfigError::ZeroCacheCapacity => write!(f, "cache capacity must be nonzero"),
        }
    }
}
