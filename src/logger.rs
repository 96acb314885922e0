use std::io::Write;

/// Installs the process-wide logger. Call once, from `main`.
///
/// `RUST_LOG` takes precedence over the `debug` flag when set.
pub fn init_logger(debug: bool) {
    env_logger::Builder::new()
        .filter_level(if debug { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let ts = buf.timestamp();
            writeln!(buf, "{} [{}] {}", ts, record.level(), record.args())
        })
        .init();
}
