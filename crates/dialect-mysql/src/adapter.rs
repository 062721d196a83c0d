use std::{
    io,
    sync::{Mutex, MutexGuard, OnceLock},
    time::Duration,
};

use mysql::{OptsBuilder, Pool, PooledConn, Row, consts::CapabilityFlags, prelude::Queryable};
use shimql_core::{
    ConnectArgs, ConnectionConfig, DatabaseAdapter, ExecutionError, OptionValue, Result, Version,
};
use tracing::debug;

use crate::options;

const CONNECT_SQL: &str = "CONNECT mysql";
const PING_QUERY: &str = "SELECT 1";
const SERVER_VERSION_QUERY: &str = "SELECT VERSION()";
const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";
const DEFAULT_MYSQL_PORT: u16 = 3306;
const POISONED_CONNECTION_MESSAGE: &str = "mysql connection state was poisoned";

/// One checked-out driver connection. The server version is computed on
/// first use and cached; a concurrent race costs at most a redundant parse.
pub struct MysqlAdapter {
    connection: Mutex<PooledConn>,
    server_version: OnceLock<Version>,
}

impl MysqlAdapter {
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let args = options::connect_args(config)?;
        let connection = connect_connection(&args)?;
        debug!(
            host = args.opts.get(options::HOST_OPTION).and_then(OptionValue::as_str),
            database = args
                .opts
                .get(options::DATABASE_OPTION)
                .and_then(OptionValue::as_str),
            "mysql connection established"
        );
        Ok(Self {
            connection: Mutex::new(connection),
            server_version: OnceLock::new(),
        })
    }

    /// Fetch every row of a result set. The charset argument normalizes the
    /// call signature across backend variants; this backend ignores it.
    pub fn fetch_all(&self, sql: &str, _charset: Option<&str>) -> Result<Vec<Row>> {
        let mut connection = self.lock_connection(sql)?;
        connection
            .query::<Row, _>(sql)
            .map_err(|source| execution_error(sql, source))
    }

    /// Fetch the first row, charset ignored as above.
    pub fn fetch_one(&self, sql: &str, _charset: Option<&str>) -> Result<Option<Row>> {
        let mut connection = self.lock_connection(sql)?;
        connection
            .query_first::<Row, _>(sql)
            .map_err(|source| execution_error(sql, source))
    }

    fn lock_connection(&self, sql: &str) -> Result<MutexGuard<'_, PooledConn>> {
        self.connection
            .lock()
            .map_err(|_| execution_error(sql, io::Error::other(POISONED_CONNECTION_MESSAGE)))
    }
}

impl DatabaseAdapter for MysqlAdapter {
    fn execute(&self, sql: &str) -> Result<()> {
        let mut connection = self.lock_connection(sql)?;
        connection
            .query_drop(sql)
            .map_err(|source| execution_error(sql, source))
    }

    fn ping(&self) -> Result<bool> {
        let mut connection = self.lock_connection(PING_QUERY)?;
        connection
            .query_drop(PING_QUERY)
            .map_err(|source| execution_error(PING_QUERY, source))?;
        Ok(true)
    }

    fn server_version(&self) -> Result<Version> {
        if let Some(version) = self.server_version.get() {
            return Ok(version.clone());
        }
        let raw = {
            let mut connection = self.lock_connection(SERVER_VERSION_QUERY)?;
            query_scalar(&mut connection, SERVER_VERSION_QUERY)?
        };
        let version =
            parse_server_version(&raw).ok_or_else(|| invalid_server_version_error(&raw))?;
        debug!(raw = raw.as_str(), "detected mysql server version");
        Ok(self.server_version.get_or_init(|| version).clone())
    }
}

fn connect_connection(args: &ConnectArgs) -> Result<PooledConn> {
    let mut builder = OptsBuilder::new()
        .ip_or_hostname(
            opt_string(args, options::HOST_OPTION).or(Some(DEFAULT_MYSQL_HOST.to_string())),
        )
        .tcp_port(
            opt_int(args, options::PORT_OPTION)
                .and_then(|port| u16::try_from(port).ok())
                .unwrap_or(DEFAULT_MYSQL_PORT),
        )
        .user(opt_string(args, options::USER_OPTION))
        .pass(opt_string(args, options::PASSWORD_OPTION))
        .db_name(opt_string(args, options::DATABASE_OPTION));
    if let Some(socket) = opt_string(args, options::SOCKET_OPTION) {
        builder = builder.socket(Some(socket));
    }
    if let Some(timeout) = connect_timeout_seconds(args) {
        builder = builder.tcp_connect_timeout(Some(Duration::from_secs(timeout)));
    }
    if let Some(flags) = opt_int(args, options::CLIENT_FLAG_OPTION) {
        builder = builder
            .additional_capabilities(CapabilityFlags::from_bits_truncate(flags as u32));
    }

    let pool = Pool::new(builder).map_err(|source| execution_error(CONNECT_SQL, source))?;
    pool.get_conn()
        .map_err(|source| execution_error(CONNECT_SQL, source))
}

fn connect_timeout_seconds(args: &ConnectArgs) -> Option<u64> {
    opt_int(args, options::CONNECT_TIMEOUT_OPTION)
        .or_else(|| opt_int(args, options::CONNECTION_TIMEOUT_OPTION))
        .and_then(|timeout| u64::try_from(timeout).ok())
}

fn opt_string(args: &ConnectArgs, option: &str) -> Option<String> {
    args.opts
        .get(option)
        .and_then(OptionValue::as_str)
        .map(str::to_string)
}

fn opt_int(args: &ConnectArgs, option: &str) -> Option<i64> {
    args.opts.get(option).and_then(OptionValue::as_int)
}

fn query_scalar(connection: &mut PooledConn, sql: &str) -> Result<String> {
    connection
        .query_first::<String, _>(sql)
        .map_err(|source| execution_error(sql, source))?
        .ok_or_else(|| execution_error(sql, io::Error::other("query returned no rows")))
}

/// Lenient `major.minor.patch` parse of a server version string; tolerates
/// vendor suffixes such as `8.4.0-log` or `11.4.2-MariaDB`.
pub(crate) fn parse_server_version(raw: &str) -> Option<Version> {
    let mut parts = raw.split_whitespace().next()?.split('.');
    let major = parse_version_component(parts.next()?)?;
    let minor = parts.next().and_then(parse_version_component).unwrap_or(0);
    let patch = parts.next().and_then(parse_version_component).unwrap_or(0);

    Some(Version {
        major,
        minor,
        patch,
    })
}

fn parse_version_component(raw: &str) -> Option<u16> {
    let digits = raw
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u16>().ok()
}

fn invalid_server_version_error(raw: &str) -> shimql_core::Error {
    execution_error(
        SERVER_VERSION_QUERY,
        io::Error::other(format!("failed to parse mysql server version string: `{raw}`")),
    )
}

fn execution_error<E>(sql: &str, source: E) -> shimql_core::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    ExecutionError::statement_failed(sql, source).into()
}
