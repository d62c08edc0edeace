use thiserror::Error;

/// Errors that fail a whole conversion.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("header row is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("malformed row at line {line}: {fault}")]
    MalformedRow { line: usize, fault: RowFault },
}

/// Why a single data row could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowFault {
    #[error("unparsable trade number '{0}'")]
    TradeNum(String),

    #[error("type '{0}' is neither an entry nor an exit")]
    UnknownKind(String),

    #[error("type '{0}' matches both entry and exit markers")]
    AmbiguousKind(String),

    #[error("type '{0}' names neither a long nor a short position")]
    UnknownSide(String),

    #[error("unparsable timestamp '{0}'")]
    Timestamp(String),

    #[error("unparsable {field} '{value}'")]
    Number { field: &'static str, value: String },
}
