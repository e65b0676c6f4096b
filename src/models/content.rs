//! Homepage and editorial content: sliders, news, about sections, values, awards
//!
//! Field shapes mirror the backend's JSON exactly; timestamps stay ISO 8601
//! strings as the wire carries them.

use serde::{Deserialize, Serialize};

/// Homepage slider image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    pub id: i64,
    pub image_url: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub link_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// News article. `content` is omitted by some list endpoints
/// (dashboard recents), so it stays optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub featured_image: Option<String>,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// "About us" page section, addressed by its `section_key`
/// (brief, mission, vision, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutSection {
    pub id: i64,
    pub section_key: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    pub updated_at: Option<String>,
}

/// Cooperative core value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub icon_class: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

/// Award or recognition shown on the about page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    pub id: i64,
    pub title: String,
    pub year: Option<i64>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}
