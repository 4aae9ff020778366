pub mod chat;
pub mod config;
pub mod contact;
pub mod mood;
pub mod page;
pub mod timer;

use std::path::Path;

use mindful_core::{Config, Page, PageKind, PageRuntime};
use tracing_subscriber::EnvFilter;

/// Load `path`, or the default config location.
pub fn load_config(path: Option<&Path>) -> mindful_core::Result<Config> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` wins over the config.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_page(kind: PageKind, config: &Config) -> PageRuntime {
    PageRuntime::load(Page::builtin(kind, &config.timer.presets), config)
}
