use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use trend_dashboard::{
    DashboardConfig, HttpTrendSource, PageState, init, storage::write_snapshot, ui,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env()?;
    info!(api_base = %config.api_base, page = %config.page_path, "starting trend dashboard");

    let state = PageState::new(ui::trends_page(&config));
    let source = HttpTrendSource::new(&config)?;
    let dashboard = init(state, source).await?;

    let html = {
        let doc = dashboard.state().document.lock().await;
        ui::render_page(&doc)
    };

    match &config.output_path {
        Some(path) => write_snapshot(path, &html).await?,
        None => println!("{html}"),
    }

    Ok(())
}
