//! Error codes and exit status for novactl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the daemon returns a reply the CLI cannot decode
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when the daemon is unavailable/unreachable
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// Map an error chain onto an exit status.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
            if e.is_connect() || e.is_timeout() {
                return EXIT_DAEMON_UNAVAILABLE;
            }
            if e.is_decode() {
                return EXIT_INVALID_RESPONSE;
            }
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return EXIT_INVALID_RESPONSE;
        }
    }
    EXIT_GENERAL_ERROR
}
