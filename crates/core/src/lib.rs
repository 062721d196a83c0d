mod adapter;
mod config;
mod dialect;
mod error;
mod fragment;
mod path;

pub use adapter::DatabaseAdapter;
pub use config::{
    ConnectArgs, ConnectionConfig, IsolationLevel, OptionKind, OptionSchema, OptionValue, Version,
};
pub use dialect::{CapabilityOverrides, Dialect, DialectCapabilities};
pub use error::{ConfigError, Error, ExecutionError, Result};
pub use fragment::{RenderMode, RenderedFragment};
pub use path::{JsonPath, PathStep};
