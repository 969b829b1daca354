use serde::{Deserialize, Serialize};

// --- Feed item types ---

/// One entry of a feed file as the upstream producer emits it. Nothing is
/// guaranteed: every field is optional and several travel under more than
/// one name depending on which pipeline wrote the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub link: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub site: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub thumbnail: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "impactBrief")]
    pub impact_brief: Option<String>,
}

/// The fixed shape every card renders from. Every field is always a string;
/// fields absent from the raw item resolve to defaults at normalization
/// time, so the renderer never sees a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub image: String,
    pub impact_brief: String,
}

impl RawItem {
    /// Resolve aliased fields into the fixed display shape. The first
    /// non-empty candidate wins, primary field listed first. Idempotent:
    /// a normalized item's fields all sit in primary position, so a second
    /// pass reproduces the same values.
    pub fn normalize(&self) -> NormalizedItem {
        NormalizedItem {
            title: pick(&[&self.title, &self.headline], "Untitled"),
            link: pick(&[&self.link, &self.url], "#"),
            source: pick(&[&self.source, &self.site], ""),
            image: pick(&[&self.image, &self.image_url, &self.thumbnail], ""),
            impact_brief: pick(&[&self.impact_brief], ""),
        }
    }
}

impl From<&NormalizedItem> for RawItem {
    fn from(item: &NormalizedItem) -> Self {
        RawItem {
            title: Some(item.title.clone()),
            link: Some(item.link.clone()),
            source: Some(item.source.clone()),
            image: Some(item.image.clone()),
            impact_brief: Some(item.impact_brief.clone()),
            ..RawItem::default()
        }
    }
}

fn pick(candidates: &[&Option<String>], default: &str) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
