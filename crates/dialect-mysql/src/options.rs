use std::collections::BTreeMap;

use mysql::consts::CapabilityFlags;
use shimql_core::{
    ConfigError, ConnectArgs, ConnectionConfig, OptionKind, OptionSchema, OptionValue, Result,
};

// Connector option names the driver expects for the standard URL fields.
pub(crate) const HOST_OPTION: &str = "host";
pub(crate) const PORT_OPTION: &str = "port";
pub(crate) const USER_OPTION: &str = "user";
pub(crate) const PASSWORD_OPTION: &str = "password";
pub(crate) const DATABASE_OPTION: &str = "database";
pub(crate) const SOCKET_OPTION: &str = "unix_socket";

pub(crate) const BUFFERED_OPTION: &str = "buffered";
pub(crate) const CLIENT_FLAG_OPTION: &str = "client_flag";
pub(crate) const CONNECT_TIMEOUT_OPTION: &str = "connect_timeout";
pub(crate) const CONNECTION_TIMEOUT_OPTION: &str = "connection_timeout";

// Declared connection options and the kind each coerces to; anything not
// listed passes through to the driver unmodified.
pub(crate) const CONNECT_OPTION_SCHEMA: OptionSchema = &[
    ("allow_local_infile", OptionKind::Bool),
    ("autocommit", OptionKind::Bool),
    (BUFFERED_OPTION, OptionKind::Bool),
    (CLIENT_FLAG_OPTION, OptionKind::Int),
    ("compress", OptionKind::Bool),
    (CONNECTION_TIMEOUT_OPTION, OptionKind::Int),
    (CONNECT_TIMEOUT_OPTION, OptionKind::Int),
    ("consume_results", OptionKind::Bool),
    ("force_ipv6", OptionKind::Bool),
    ("get_warnings", OptionKind::Bool),
    ("pool_reset_session", OptionKind::Bool),
    ("pool_size", OptionKind::Int),
    ("raise_on_warnings", OptionKind::Bool),
    ("raw", OptionKind::Bool),
    ("ssl_verify_cert", OptionKind::Bool),
    ("use_pure", OptionKind::Bool),
    ("use_unicode", OptionKind::Bool),
];

pub(crate) fn connect_args(config: &ConnectionConfig) -> Result<ConnectArgs> {
    let mut opts = translate_connect_fields(config);
    for (key, value) in &config.extra {
        opts.insert(key.clone(), OptionValue::Str(value.clone()));
    }

    for (option, kind) in CONNECT_OPTION_SCHEMA {
        coerce_option(&mut opts, option, *kind)?;
    }

    // The driver refuses to release a cursor without reading it fully, so
    // unbuffered is not a safe default.
    opts.entry(BUFFERED_OPTION.to_string())
        .or_insert(OptionValue::Bool(true));

    merge_found_rows_flag(&mut opts);

    Ok(ConnectArgs {
        args: Vec::new(),
        opts,
    })
}

/// Driver capability bit that makes affected-row counts accurate. `None`
/// skips the merge; the capability is best-effort.
pub(crate) fn found_rows_capability() -> Option<i64> {
    Some(i64::from(CapabilityFlags::CLIENT_FOUND_ROWS.bits()))
}

fn translate_connect_fields(config: &ConnectionConfig) -> BTreeMap<String, OptionValue> {
    let mut opts = BTreeMap::new();
    if let Some(host) = &config.host {
        opts.insert(HOST_OPTION.to_string(), OptionValue::Str(host.clone()));
    }
    if let Some(port) = config.port {
        opts.insert(PORT_OPTION.to_string(), OptionValue::Int(i64::from(port)));
    }
    if let Some(user) = &config.user {
        opts.insert(USER_OPTION.to_string(), OptionValue::Str(user.clone()));
    }
    if let Some(password) = &config.password {
        opts.insert(
            PASSWORD_OPTION.to_string(),
            OptionValue::Str(password.clone()),
        );
    }
    opts.insert(
        DATABASE_OPTION.to_string(),
        OptionValue::Str(config.database.clone()),
    );
    if let Some(socket) = &config.socket {
        opts.insert(SOCKET_OPTION.to_string(), OptionValue::Str(socket.clone()));
    }
    opts
}

fn coerce_option(
    opts: &mut BTreeMap<String, OptionValue>,
    option: &str,
    kind: OptionKind,
) -> Result<()> {
    let Some(value) = opts.get(option) else {
        return Ok(());
    };
    let coerced = coerce_value(option, value, kind)?;
    opts.insert(option.to_string(), coerced);
    Ok(())
}

fn coerce_value(option: &str, value: &OptionValue, kind: OptionKind) -> Result<OptionValue> {
    if value.kind() == kind {
        return Ok(value.clone());
    }
    match (kind, value) {
        (OptionKind::Bool, OptionValue::Int(int)) => Ok(OptionValue::Bool(*int != 0)),
        (OptionKind::Bool, OptionValue::Str(raw)) => parse_bool(raw)
            .map(OptionValue::Bool)
            .ok_or_else(|| invalid_option(option, raw, kind)),
        (OptionKind::Int, OptionValue::Bool(flag)) => Ok(OptionValue::Int(i64::from(*flag))),
        (OptionKind::Int, OptionValue::Str(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|_| invalid_option(option, raw, kind)),
        (OptionKind::Str, OptionValue::Bool(flag)) => Ok(OptionValue::Str(flag.to_string())),
        (OptionKind::Str, OptionValue::Int(int)) => Ok(OptionValue::Str(int.to_string())),
        _ => Ok(value.clone()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" | "t" | "1" => Some(true),
        "false" | "no" | "off" | "n" | "f" | "0" => Some(false),
        _ => None,
    }
}

fn merge_found_rows_flag(opts: &mut BTreeMap<String, OptionValue>) {
    let Some(found_rows) = found_rows_capability() else {
        return;
    };
    let flags = match opts.get(CLIENT_FLAG_OPTION) {
        Some(OptionValue::Int(flags)) => *flags,
        _ => 0,
    };
    opts.insert(
        CLIENT_FLAG_OPTION.to_string(),
        OptionValue::Int(flags | found_rows),
    );
}

fn invalid_option(option: &str, value: &str, expected: OptionKind) -> shimql_core::Error {
    ConfigError::InvalidOptionValue {
        option: option.to_string(),
        value: value.to_string(),
        expected,
    }
    .into()
}
