use portfolio_site::config::{Config, DEFAULT_CONFIG_PATH};
use portfolio_site::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path (extension optional)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Create the Tokio runtime, sizing worker threads from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger::log_info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(server::run(cfg))?;
    Ok(())
}
