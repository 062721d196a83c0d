use std::io;

use mysql::error::Error;

/// Client error codes the server-side category reports when the underlying
/// connection is gone: connection reset, server gone away, server lost,
/// and their SSL/pipe equivalents.
const FATAL_ERROR_CODES: [u16; 6] = [2006, 2013, 2014, 2045, 2055, 2048];

/// Free-text signals some driver paths emit instead of a structured code.
const CONNECTION_LOST_MESSAGES: [&str; 2] = [
    "MySQL Connection not available",
    "Connection to MySQL is not available",
];

/// Classify a caught driver error: `true` means the connection must be
/// discarded. Total over every error shape; categories this layer does not
/// recognize classify `false` rather than forcing a reconnect.
pub(crate) fn is_connection_dead(error: &Error) -> bool {
    match error {
        Error::MySqlError(_) | Error::DriverError(_) => {
            error_code(error).is_some_and(is_fatal_error_code) || signals_lost_connection(error)
        }
        Error::IoError(io_error) => is_fatal_io_kind(io_error.kind()),
        _ => false,
    }
}

/// Structured error code of a server-reported failure, when the driver
/// provides one.
pub(crate) fn error_code(error: &Error) -> Option<u16> {
    match error {
        Error::MySqlError(server_error) => Some(server_error.code),
        _ => None,
    }
}

fn is_fatal_error_code(code: u16) -> bool {
    FATAL_ERROR_CODES.contains(&code)
}

fn signals_lost_connection(error: &Error) -> bool {
    let message = error.to_string();
    CONNECTION_LOST_MESSAGES
        .iter()
        .any(|phrase| message.contains(phrase))
}

fn is_fatal_io_kind(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof
    )
}
