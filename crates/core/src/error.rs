use thiserror::Error;

use crate::config::OptionKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
}

/// Failures detected while preparing a connection, before any network I/O.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for connection option `{option}`: expected {expected}")]
    InvalidOptionValue {
        option: String,
        value: String,
        expected: OptionKind,
    },
    #[error("unknown isolation level `{value}`")]
    UnknownIsolationLevel { value: String },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement `{sql}` failed")]
    StatementFailed {
        sql: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ExecutionError {
    pub fn statement_failed<E>(sql: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StatementFailed {
            sql: sql.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
