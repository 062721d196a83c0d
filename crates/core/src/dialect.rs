use crate::{
    ConnectArgs, ConnectionConfig, DatabaseAdapter, IsolationLevel, JsonPath, PathStep,
    RenderMode, RenderedFragment, Result,
};

/// Feature flags a backend reports. Immutable once constructed; variants
/// merge [`CapabilityOverrides`] into a base value instead of patching a
/// shared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectCapabilities {
    pub supports_statement_cache: bool,
    pub supports_sane_rowcount: bool,
    pub supports_sane_multi_rowcount: bool,
    pub supports_native_decimal: bool,
    pub allows_uuid_binds: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityOverrides {
    pub supports_statement_cache: Option<bool>,
    pub supports_sane_rowcount: Option<bool>,
    pub supports_sane_multi_rowcount: Option<bool>,
    pub supports_native_decimal: Option<bool>,
    pub allows_uuid_binds: Option<bool>,
}

impl DialectCapabilities {
    pub fn apply(mut self, overrides: &CapabilityOverrides) -> Self {
        if let Some(value) = overrides.supports_statement_cache {
            self.supports_statement_cache = value;
        }
        if let Some(value) = overrides.supports_sane_rowcount {
            self.supports_sane_rowcount = value;
        }
        if let Some(value) = overrides.supports_sane_multi_rowcount {
            self.supports_sane_multi_rowcount = value;
        }
        if let Some(value) = overrides.supports_native_decimal {
            self.supports_native_decimal = value;
        }
        if let Some(value) = overrides.allows_uuid_binds {
            self.allows_uuid_binds = value;
        }
        self
    }
}

/// Backend adaptation seam between the generic compiler/pool and one
/// driver.
///
/// The default rendering policy assumes a format-style (`%s`) bind
/// placeholder, so raw percent signs in statement text must be doubled.
/// A dialect whose driver leaves percent signs inert must override
/// [`Dialect::double_percents`] and the operator rendering together; the
/// two must agree.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    fn driver(&self) -> &'static str;

    fn capabilities(&self) -> &DialectCapabilities;

    fn placeholder(&self) -> &'static str {
        "%s"
    }

    /// Whether percent signs must be doubled to survive the driver's
    /// placeholder parsing.
    fn double_percents(&self) -> bool {
        true
    }

    fn quote_character(&self) -> char {
        '"'
    }

    fn escape_identifier(&self, value: &str) -> String {
        let quote = self.quote_character();
        let doubled_quote = format!("{quote}{quote}");
        let escaped = value.replace(quote, &doubled_quote);
        if self.double_percents() {
            escaped.replace('%', "%%")
        } else {
            escaped
        }
    }

    fn quote_identifier(&self, value: &str) -> String {
        let quote = self.quote_character();
        let escaped = self.escape_identifier(value);
        format!("{quote}{escaped}{quote}")
    }

    fn render_mod_binary(&self, left: &str, right: &str) -> String {
        format!("{left} %% {right}")
    }

    /// Single-level document lookup (`column[key]`).
    fn json_index_accessor(
        &self,
        column: &str,
        step: &PathStep,
        mode: RenderMode,
    ) -> RenderedFragment;

    /// Multi-level document lookup (`column[path...]`). The path must not
    /// be empty.
    fn json_path_accessor(
        &self,
        column: &str,
        path: &JsonPath,
        mode: RenderMode,
    ) -> RenderedFragment;

    /// Normalize a parsed connection URL into driver connect arguments.
    /// Uncoercible declared options fail here, before any network I/O.
    fn connect_args(&self, config: &ConnectionConfig) -> Result<ConnectArgs>;

    fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseAdapter>>;

    /// `true` means the connection is no longer usable and the pool should
    /// discard it. Errors this dialect does not recognize classify `false`.
    fn is_disconnect(&self, error: &(dyn std::error::Error + 'static)) -> bool;

    fn isolation_levels(&self) -> &'static [IsolationLevel];
}
