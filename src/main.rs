use anyhow::Result;
use chrono::Utc;

use kasa_screens::{bridge, ForecastScreen};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    kasa_core::init()?;

    // Load and validate configuration
    let mut app = kasa_core::App::new()?;
    let config = app.config();

    tracing::info!("Kasa application started");

    let provider = bridge::weather_provider(&config)?;
    let hint = bridge::location_hint(&config);

    // Widget line: the one-line Japanese description
    let timeline = kasa_weather::widget::timeline(&hint, &provider).await;
    for entry in &timeline.entries {
        println!("{}", entry.description);
    }

    // Forecast screen
    let mut forecast = ForecastScreen::new(provider, hint);
    forecast.refresh().await;
    if !forecast.place_label.is_empty() {
        println!("\n{} - {}", forecast.place_label, Utc::now().format("%Y/%m/%d"));
    }
    println!("{}", forecast.current_text);
    println!("{}", forecast.hourly_text);
    println!("{}", forecast.daily_text);
    println!("\n{}", kasa_screens::forecast::ATTRIBUTION);

    // Graceful shutdown
    app.shutdown()?;

    Ok(())
}
