mod adapter;
mod health;
mod json_path;
mod options;

pub use adapter::MysqlAdapter;

use shimql_core::{
    CapabilityOverrides, ConnectArgs, ConnectionConfig, DatabaseAdapter, Dialect,
    DialectCapabilities, IsolationLevel, JsonPath, PathStep, RenderMode, RenderedFragment, Result,
};

// The driver's bind placeholder does not consume percent signs, so
// statement text never needs percent doubling.
pub(crate) const PLACEHOLDER: &str = "?";

const MYSQL_DIALECT_NAME: &str = "mysql";
const MARIADB_DIALECT_NAME: &str = "mariadb";
const DRIVER_NAME: &str = "mysql";

const MYSQL_CAPABILITIES: DialectCapabilities = DialectCapabilities {
    supports_statement_cache: true,
    supports_sane_rowcount: true,
    supports_sane_multi_rowcount: true,
    supports_native_decimal: true,
    allows_uuid_binds: true,
};

const MARIADB_OVERRIDES: CapabilityOverrides = CapabilityOverrides {
    supports_statement_cache: None,
    supports_sane_rowcount: None,
    supports_sane_multi_rowcount: None,
    supports_native_decimal: None,
    allows_uuid_binds: Some(false),
};

const ISOLATION_LEVELS: &[IsolationLevel] = &[
    IsolationLevel::Serializable,
    IsolationLevel::ReadUncommitted,
    IsolationLevel::ReadCommitted,
    IsolationLevel::RepeatableRead,
    IsolationLevel::Autocommit,
];

/// MySQL adaptation layer over the `mysql` driver crate. The MariaDB
/// variant shares the implementation and differs only in the capability set
/// merged at construction.
#[derive(Debug, Clone)]
pub struct MysqlDialect {
    name: &'static str,
    capabilities: DialectCapabilities,
}

impl MysqlDialect {
    pub fn new() -> Self {
        Self {
            name: MYSQL_DIALECT_NAME,
            capabilities: MYSQL_CAPABILITIES,
        }
    }

    pub fn mariadb() -> Self {
        Self {
            name: MARIADB_DIALECT_NAME,
            capabilities: MYSQL_CAPABILITIES.apply(&MARIADB_OVERRIDES),
        }
    }
}

impl Default for MysqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        self.name
    }

    fn driver(&self) -> &'static str {
        DRIVER_NAME
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    fn double_percents(&self) -> bool {
        false
    }

    fn quote_character(&self) -> char {
        '`'
    }

    fn render_mod_binary(&self, left: &str, right: &str) -> String {
        format!("{left} % {right}")
    }

    fn json_index_accessor(
        &self,
        column: &str,
        step: &PathStep,
        mode: RenderMode,
    ) -> RenderedFragment {
        json_path::index_accessor(column, step, mode)
    }

    fn json_path_accessor(
        &self,
        column: &str,
        path: &JsonPath,
        mode: RenderMode,
    ) -> RenderedFragment {
        json_path::path_accessor(column, path, mode)
    }

    fn connect_args(&self, config: &ConnectionConfig) -> Result<ConnectArgs> {
        options::connect_args(config)
    }

    fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseAdapter>> {
        Ok(Box::new(MysqlAdapter::connect(config)?))
    }

    fn is_disconnect(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        error
            .downcast_ref::<mysql::Error>()
            .is_some_and(health::is_connection_dead)
    }

    fn isolation_levels(&self) -> &'static [IsolationLevel] {
        ISOLATION_LEVELS
    }
}
