use shimql_core::{
    CapabilityOverrides, ConnectArgs, ConnectionConfig, DatabaseAdapter, Dialect,
    DialectCapabilities, IsolationLevel, JsonPath, PathStep, RenderMode, RenderedFragment, Result,
};

struct ContractDialect {
    capabilities: DialectCapabilities,
}

impl ContractDialect {
    fn new() -> Self {
        Self {
            capabilities: base_capabilities(),
        }
    }
}

fn base_capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_statement_cache: true,
        supports_sane_rowcount: false,
        supports_sane_multi_rowcount: false,
        supports_native_decimal: true,
        allows_uuid_binds: true,
    }
}

impl Dialect for ContractDialect {
    fn name(&self) -> &'static str {
        "contract"
    }

    fn driver(&self) -> &'static str {
        "none"
    }

    fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    fn json_index_accessor(
        &self,
        column: &str,
        _step: &PathStep,
        _mode: RenderMode,
    ) -> RenderedFragment {
        RenderedFragment::Literal(column.to_string())
    }

    fn json_path_accessor(
        &self,
        column: &str,
        _path: &JsonPath,
        _mode: RenderMode,
    ) -> RenderedFragment {
        RenderedFragment::Literal(column.to_string())
    }

    fn connect_args(&self, _config: &ConnectionConfig) -> Result<ConnectArgs> {
        Ok(ConnectArgs::default())
    }

    fn connect(&self, _config: &ConnectionConfig) -> Result<Box<dyn DatabaseAdapter>> {
        unimplemented!("contract dialect does not connect")
    }

    fn is_disconnect(&self, _error: &(dyn std::error::Error + 'static)) -> bool {
        false
    }

    fn isolation_levels(&self) -> &'static [IsolationLevel] {
        &[IsolationLevel::Serializable]
    }
}

#[test]
fn generic_defaults_assume_percent_consuming_placeholders() {
    let dialect = ContractDialect::new();

    assert_eq!(dialect.placeholder(), "%s");
    assert!(dialect.double_percents());
    assert_eq!(dialect.render_mod_binary("total", "7"), "total %% 7");
}

#[test]
fn generic_identifier_escaping_doubles_quotes_and_percents() {
    let dialect = ContractDialect::new();

    assert_eq!(dialect.quote_character(), '"');
    assert_eq!(
        dialect.escape_identifier("100% \"done\""),
        "100%% \"\"done\"\""
    );
    assert_eq!(dialect.quote_identifier("col"), "\"col\"");
}

#[test]
fn rendered_fragments_expose_sql_and_bound_value() {
    let literal = RenderedFragment::Literal("JSON_EXTRACT(doc, '$')".to_string());
    assert_eq!(literal.sql(), "JSON_EXTRACT(doc, '$')");
    assert_eq!(literal.bound_value(), None);

    let bound = RenderedFragment::Bound {
        sql: "JSON_EXTRACT(doc, ?)".to_string(),
        value: "$".to_string(),
    };
    assert_eq!(bound.sql(), "JSON_EXTRACT(doc, ?)");
    assert_eq!(bound.bound_value(), Some("$"));
}

#[test]
fn capability_overrides_merge_without_touching_unset_fields() {
    let overrides = CapabilityOverrides {
        allows_uuid_binds: Some(false),
        supports_sane_rowcount: Some(true),
        ..CapabilityOverrides::default()
    };

    let merged = base_capabilities().apply(&overrides);

    assert!(!merged.allows_uuid_binds);
    assert!(merged.supports_sane_rowcount);
    assert!(merged.supports_statement_cache);
    assert!(!merged.supports_sane_multi_rowcount);
    assert!(merged.supports_native_decimal);
}

#[test]
fn empty_overrides_leave_the_base_untouched() {
    let merged = base_capabilities().apply(&CapabilityOverrides::default());

    assert_eq!(merged, base_capabilities());
}

#[test]
fn json_path_tracks_step_order_and_emptiness() {
    let path: JsonPath = vec![PathStep::key("a"), PathStep::index(3)].into();

    assert_eq!(path.len(), 2);
    assert!(!path.is_empty());
    assert_eq!(
        path.steps(),
        &[PathStep::Key("a".to_string()), PathStep::Index(3)]
    );

    let empty = JsonPath::new(Vec::new());
    assert!(empty.is_empty());
}
