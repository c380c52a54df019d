use anyhow::{Context, Result};
use leafcare_ui::config::Config;
use leafcare_ui::dom::{dashboard, Document, MemoryDocument};
use leafcare_ui::i18n::{LocaleRegistry, LocaleTable, LocalizationMetrics, TableValidator};
use leafcare_ui::notify::HttpNotifier;
use leafcare_ui::page::Page;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Uploads shown in the preview dashboard.
const SAMPLE_UPLOADS: &[&str] = &["tomato_leaf.jpg", "potato_blight.png", "maize_rust.jpg"];

#[derive(Serialize)]
struct TargetSnapshot {
    key: String,
    text: String,
}

#[derive(Serialize)]
struct PageSnapshot {
    locale: String,
    targets: Vec<TargetSnapshot>,
    metrics: leafcare_ui::i18n::MetricsReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leafcare_ui=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let requested = std::env::args().nth(1);

    let table = Arc::new(LocaleTable::builtin());
    let report = TableValidator::validate(&table);
    for warning in &report.warnings {
        warn!("Locale table: {}", warning);
    }
    for error in &report.errors {
        warn!("Locale table: {}", error);
    }

    let metrics = Arc::new(LocalizationMetrics::new());
    let notifier = Arc::new(
        HttpNotifier::new(&config, metrics.clone()).context("Failed to build notifier")?,
    );

    let mut doc = MemoryDocument::new();
    dashboard::build(&mut doc, SAMPLE_UPLOADS);
    let (mut page, _) = Page::mount(
        &mut doc,
        table,
        notifier,
        metrics.clone(),
        config.server_lang.as_deref(),
    );

    if let Some(locale) = requested {
        info!("Switching to '{}'", locale);
        page.localizer_mut()
            .select_locale(&mut doc, &locale)
            .settled()
            .await;
    }

    let active = page.localizer().active_locale();
    if let Some(locale) = LocaleRegistry::get().get_by_code(active) {
        info!("Rendered in {} ({})", locale.name, locale.code);
    }

    let snapshot = PageSnapshot {
        locale: page.localizer().active_locale().to_string(),
        targets: page
            .localizer()
            .targets()
            .iter()
            .map(|target| TargetSnapshot {
                key: target.key.clone(),
                text: doc.text_content(target.element).unwrap_or_default(),
            })
            .collect(),
        metrics: metrics.report(),
    };

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
