// Data models — Rust structs that map to database rows and API JSON.
//
// These are the types that flow through the application. They're separate
// from the database queries so the segmenter and web handlers can use them
// without depending on rusqlite directly.
//
// Ids are uuid-v4 strings. Incoming JSON may omit them (and the cosmetic
// icon/color fields) — serde fills the defaults, so a client posting a bare
// hotspot gets a fresh id the same way the server-built ones do.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh entity id (uuid v4, string form).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_icon() -> String {
    "sparkles".to_string()
}

fn default_color() -> String {
    "primary".to_string()
}

fn default_rotation() -> Option<f64> {
    Some(0.0)
}

/// A top-level authored unit: an ordered sequence of topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    pub created_at: String,
}

/// A content section within a chapter, enriched with hotspots/annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub illustration: Option<String>,
    pub illustration_prompt: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A positioned, labeled point of interest on a topic's illustration.
/// x and y are percentages of the display plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    #[serde(default = "new_id")]
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub title: String,
    pub description: String,
    pub fun_fact: Option<String>,
}

/// A freeform drawn overlay (arrow/box/text) on a topic's illustration.
/// `end_x`/`end_y` are only meaningful for arrows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default = "default_rotation")]
    pub rotation: Option<f64>,
    pub text: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
}

/// Partial update for a topic, applied field-by-field.
///
/// A missing field leaves the stored value unchanged. A present `hotspots`
/// or `annotations` list replaces the stored set wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub illustration: Option<String>,
    pub hotspots: Option<Vec<Hotspot>>,
    pub annotations: Option<Vec<Annotation>>,
}

/// A health-ping record posted by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    #[serde(default = "new_id")]
    pub id: String,
    pub client_name: String,
    pub timestamp: String,
}
