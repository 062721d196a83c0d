use shimql_core::{Dialect, IsolationLevel};
use shimql_dialect_mysql::MysqlDialect;

#[test]
fn modulo_renders_as_plain_infix() {
    let dialect = MysqlDialect::new();

    assert_eq!(dialect.render_mod_binary("x", "y"), "x % y");
}

#[test]
fn percent_signs_are_inert_in_identifiers() {
    let dialect = MysqlDialect::new();

    assert!(!dialect.double_percents());
    assert_eq!(dialect.escape_identifier("100% done"), "100% done");
}

#[test]
fn operator_and_identifier_percent_policies_agree() {
    let dialect = MysqlDialect::new();

    // Both surfaces must treat percent signs the same way; the driver's
    // placeholders do not consume them.
    let doubles_in_operator = dialect.render_mod_binary("x", "y").contains("%%");
    let doubles_in_identifier = dialect.escape_identifier("%").contains("%%");
    assert_eq!(doubles_in_operator, dialect.double_percents());
    assert_eq!(doubles_in_identifier, dialect.double_percents());
}

#[test]
fn identifiers_escape_backticks_by_doubling() {
    let dialect = MysqlDialect::new();

    assert_eq!(dialect.escape_identifier("weird`name"), "weird``name");
    assert_eq!(dialect.quote_identifier("weird`name"), "`weird``name`");
}

#[test]
fn placeholder_is_question_mark() {
    let dialect = MysqlDialect::new();

    assert_eq!(dialect.placeholder(), "?");
}

#[test]
fn dialect_reports_name_driver_and_capabilities() {
    let dialect = MysqlDialect::new();

    assert_eq!(dialect.name(), "mysql");
    assert_eq!(dialect.driver(), "mysql");
    assert!(dialect.capabilities().supports_statement_cache);
    assert!(dialect.capabilities().supports_sane_rowcount);
    assert!(dialect.capabilities().supports_sane_multi_rowcount);
    assert!(dialect.capabilities().supports_native_decimal);
    assert!(dialect.capabilities().allows_uuid_binds);
}

#[test]
fn mariadb_variant_overrides_uuid_binds_only() {
    let mysql = MysqlDialect::new();
    let mariadb = MysqlDialect::mariadb();

    assert_eq!(mariadb.name(), "mariadb");
    assert!(!mariadb.capabilities().allows_uuid_binds);
    assert_eq!(
        mariadb.capabilities().supports_statement_cache,
        mysql.capabilities().supports_statement_cache
    );
    assert_eq!(
        mariadb.capabilities().supports_sane_rowcount,
        mysql.capabilities().supports_sane_rowcount
    );
}

#[test]
fn recognized_isolation_levels_cover_the_documented_set() {
    let dialect = MysqlDialect::new();
    let levels = dialect.isolation_levels();

    assert_eq!(levels.len(), 5);
    for level in [
        IsolationLevel::Serializable,
        IsolationLevel::ReadUncommitted,
        IsolationLevel::ReadCommitted,
        IsolationLevel::RepeatableRead,
        IsolationLevel::Autocommit,
    ] {
        assert!(levels.contains(&level), "{level:?} must be recognized");
    }
}
