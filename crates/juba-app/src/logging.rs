use std::env;

use tracing_subscriber::EnvFilter;

/// Log to stderr so command output on stdout stays clean.
///
/// `RUST_LOG` sets the filter (default `info`), `LOG_FORMAT=json` switches to
/// one JSON object per line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
