use std::sync::Arc;

use covdash_client::{fetch_rows_with_retry, DashboardApi, RetryConfig};
use covdash_core::field::MetricField;
use covdash_core::filter::FilterParam;
use covdash_dashboard::{MultiAreaTabView, Tab, TabKind, TabSet};
use covdash_events::{AnalyticsBus, CollectorDelivery};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod render;

use config::Config;
use render::TextRenderer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "covdash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, metric = %config.metric, "Loaded configuration");

    let analytics = Arc::new(AnalyticsBus::default());
    if let Some(collector_url) = config.collector_url.clone() {
        tokio::spawn(CollectorDelivery::new(collector_url).run(analytics.subscribe()));
        tracing::info!("Analytics collector delivery started");
    }

    let api = DashboardApi::new(config.api_url.clone());

    let view = MultiAreaTabView::new(
        vec![MetricField::numeric(config.metric.clone(), "New cases")],
        vec![FilterParam::eq("areaType", config.area_type.clone())],
        TabKind::Table,
    )
    .expect("static field declaration is valid");

    let mut tabs = TabSet::new(vec![
        Tab::new("Chart", TabKind::Chart { bar_mode: None }),
        Tab::new("Table", TabKind::Table),
    ])
    .expect("static tab declaration is valid")
    .with_analytics(Arc::clone(&analytics));
    tabs.select("Table");

    let cancel = CancellationToken::new();
    let rows = match fetch_rows_with_retry(&api, &view.query(), &RetryConfig::default(), &cancel)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Fetch failed after retries");
            std::process::exit(1);
        }
    };
    tracing::info!(rows = rows.len(), "Fetched time series");

    println!("{}", view.render(&rows, &TextRenderer));
}
