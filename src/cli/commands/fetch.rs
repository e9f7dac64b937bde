//! One-off fetch for a single point.

use crate::cli::display::print_document;
use crate::cli::icons::arrow;
use crate::client::{RecommendationClient, RecommendationSource};
use crate::config::Settings;
use crate::models::Coordinate;
use crate::render::{render, render_html, update_language};

pub async fn cmd_fetch(settings: &Settings, lat: f64, lon: f64, html: bool) -> anyhow::Result<()> {
    let coordinate = Coordinate::new(lat, lon)?;
    let language = settings.default_language;
    let client = RecommendationClient::new(
        &settings.backend.base_url,
        settings.backend.timeout(),
        settings.backend.user_agent.as_deref(),
    )?;

    if !html {
        println!(
            "{} {} {} ({})",
            arrow(),
            client.base_url(),
            coordinate,
            language
        );
    }

    let result = client.fetch(coordinate, language).await?;
    let document = render(language, &result);

    if html {
        println!("{}", render_html(&update_language(language), &document)?);
    } else {
        print_document(&document);
    }
    Ok(())
}
