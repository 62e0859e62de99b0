//! Logger setup shared by the binaries.

use log::LevelFilter;
use std::env;
use std::io::Write;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn timestamp() -> String {
    chrono::Utc::now().format(TIME_FORMAT).to_string()
}

/// Installs a timestamped `env_logger`. `RUST_LOG` overrides the default
/// `info` level.
pub fn init() {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            timestamp(),
            record.level(),
            record.module_path().unwrap_or("-"),
            record.args()
        )
    });
    match env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Info);
        }
    }
    if builder.try_init().is_err() {
        debug!("logger already installed");
    }
}
