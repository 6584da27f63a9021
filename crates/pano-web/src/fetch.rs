use gloo_net::http::Request;
use pano_core::{Configuration, Tour};

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("GET {}: {}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("GET {}: HTTP {}", url, resp.status());
    }
    resp.text()
        .await
        .map_err(|e| anyhow::anyhow!("GET {}: {}", url, e))
}

pub async fn fetch_configuration(url: &str) -> anyhow::Result<Configuration> {
    let text = fetch_text(url).await?;
    Ok(Configuration::from_json(&text)?)
}

/// Fetch `tour.json` under the configured scene URL and root its assets there.
pub async fn fetch_tour(config: &Configuration) -> anyhow::Result<Tour> {
    let text = fetch_text(&config.tour_url()).await?;
    let mut tour = Tour::from_json(&text)?;
    tour.resolve_assets(&config.scene_url);
    Ok(tour)
}
