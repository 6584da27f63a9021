use crate::error::PanoResult;
use serde::Deserialize;

/// Viewer configuration, served as `config.json` next to the page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Base URL of the tour; `tour.json` and relative assets live under it.
    #[serde(alias = "sceneURL", default)]
    pub scene_url: String,
    #[serde(alias = "logoURL", default)]
    pub logo_url: Option<String>,
    /// Page title shown until the first state is entered.
    #[serde(default)]
    pub title: Option<String>,
}

impl Configuration {
    pub fn from_json(text: &str) -> PanoResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn tour_url(&self) -> String {
        join_url(&self.scene_url, "tour.json")
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with('/')
        || url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("data:")
        || url.starts_with("blob:")
}

/// Join `path` onto `base` unless `path` is already absolute.
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute(path) || base.is_empty() {
        return path.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
