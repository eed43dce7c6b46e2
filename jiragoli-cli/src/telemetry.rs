use std::{io::Write, time::Duration};

use env_logger::Env;
use log::{log, Level};

/// Plain message lines for `info`, level-tagged lines otherwise. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = buf.timestamp_seconds();
            if record.level() == Level::Info {
                writeln!(buf, "{timestamp} {}", record.args())
            } else {
                writeln!(buf, "{timestamp} {} {}", record.level(), record.args())
            }
        })
        .init();
}

pub fn emit_success(op: &str, key: Option<&str>, elapsed: Duration) {
    log!(
        outcome_level(false),
        "op={} key={} status=ok duration_ms={}",
        sanitize(op),
        sanitize(key.unwrap_or("-")),
        elapsed.as_millis(),
    );
}

pub fn emit_failure(op: &str, key: Option<&str>, elapsed: Duration, error: &str) {
    log!(
        outcome_level(true),
        "op={} key={} status=error duration_ms={} error={}",
        sanitize(op),
        sanitize(key.unwrap_or("-")),
        elapsed.as_millis(),
        sanitize(error),
    );
}

fn outcome_level(failed: bool) -> Level {
    if failed {
        Level::Warn
    } else {
        Level::Debug
    }
}

fn sanitize(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace(' ', "_")
}
