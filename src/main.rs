use anyhow::Context;
use confab::api::BackendClient;
use confab::{config, logging, ui, App};
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    config::initialize_config().context("failed to load configuration")?;
    let config = config::get_config();

    // Keep the handle alive so the file logger flushes on exit
    let _logger = logging::init(&config).context("failed to start logging")?;
    info!("starting confab against {}", config.backend_url);

    let client = BackendClient::new(config.backend_url.as_str());
    let app = Arc::new(Mutex::new(App::new()));
    {
        let mut guard = app.lock().await;
        guard.push_welcome();
        guard.logs.add(format!("backend: {}", config.backend_url));
    }

    ui::run_ui(app, client).await?;

    info!("shutting down");
    Ok(())
}
