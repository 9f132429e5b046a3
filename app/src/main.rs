//! Catalog - browse, search and favorite products from the terminal.
//!
//! Fetches the product list once on start, falls back to the local cache when
//! offline, and keeps favorites across runs.

use std::sync::Arc;

use catalog_app::{
    CatalogController, ColorMode, Config, FileStore, HttpProductSource, Renderer, Screen,
};
use is_terminal::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; stdout belongs to the screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_app=info,catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        page_size = config.page_size,
        "Starting catalog"
    );

    let storage = Arc::new(FileStore::new(&config.data_dir));
    let source = Arc::new(HttpProductSource::new(&config.api_url)?);
    let controller = Arc::new(CatalogController::new(storage, source, config.page_size)?);

    let color = match config.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    };
    let mut screen = Screen::new(controller, Renderer::new(color));
    let mut stdout = tokio::io::stdout();

    if config.once {
        let outcome = screen.render_once(&mut stdout).await?;
        tracing::info!(?outcome, "Rendered once");
        return Ok(());
    }

    // Unmount on Ctrl-C so a late response is discarded
    let mount = screen.mount_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, closing catalog");
            mount.cancel();
            std::process::exit(130);
        }
    });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    screen.run(stdin, &mut stdout).await?;

    tracing::info!("Catalog closed");
    Ok(())
}
