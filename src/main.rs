use std::sync::Arc;

mod config;
mod gateway;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

/// Config file used when no path is given (extension resolved by `config`)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Create Tokio runtime, worker count from config or CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    if cfg.completion.api_key.is_empty() {
        logger::log_warning("completion.api_key is empty; gateway calls will be rejected upstream");
    }
    if cfg.site.static_domain.is_empty() {
        logger::log_warning("site.static_domain is empty; forwarded requests will fail");
    }

    let state = Arc::new(config::AppState::new(&cfg)?);
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg);

    server::start_server_loop(listener, state, signals).await;
    Ok(())
}
