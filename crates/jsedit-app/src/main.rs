mod app_state;
mod cli;

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use jsedit_common::JseditError;
use jsedit_config::JseditConfig;

use app_state::{EditorApp, UserEvent};

const DEFAULT_LOG_DIRECTIVE: &str = "jsedit=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("jsedit panicked: {info}");
        default_hook(info);
    }));
}

fn init_logging(level: Option<&str>) {
    let mut filter = EnvFilter::from_default_env();
    match level.unwrap_or(DEFAULT_LOG_DIRECTIVE).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("ignoring invalid log level: {e}"),
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> jsedit_common::Result<JseditConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            jsedit_config::load_config_from(path)?
        }
        None => jsedit_config::load_config()?,
    };
    Ok(config)
}

fn run(config: JseditConfig, file: Option<PathBuf>) -> jsedit_common::Result<()> {
    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .map_err(|e| JseditError::Other(format!("failed to create event loop: {e}")))?;
    let mut app = EditorApp::new(config, file, event_loop.create_proxy());

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| JseditError::Other(format!("event loop error: {e}")))
}

fn main() {
    install_panic_hook();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("jsedit v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        JseditConfig::default()
    });
    tracing::info!(
        timeout_ms = config.handshake.timeout_ms,
        retry_interval_ms = config.handshake.retry_interval_ms,
        "Config loaded"
    );

    if let Err(e) = run(config, args.file) {
        tracing::error!("{e}");
    }
    tracing::info!("Shutdown complete");
}
