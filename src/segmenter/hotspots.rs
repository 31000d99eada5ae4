// Hotspot placement — fixed grid positions and icon/color palettes for
// keywords promoted to hotspots.
//
// Placement is a 3-wide grid over the display plane (percent coordinates):
// columns at x = 15/45/75, rows starting at y = 20 with a 35-step.

use crate::db::models::{new_id, Hotspot};

/// Icon palette, indexed by keyword length.
pub const ICONS: [&str; 10] = [
    "sparkles", "sun", "leaf", "droplets", "wind", "cloud", "star", "zap", "globe", "atom",
];

/// Color palette, indexed by hotspot position.
pub const COLORS: [&str; 5] = ["primary", "secondary", "accent", "warning", "success"];

/// Pick an icon for a keyword (stable per keyword: length mod palette size).
pub fn icon_for_keyword(keyword: &str) -> &'static str {
    ICONS[keyword.len() % ICONS.len()]
}

/// Pick a color for a hotspot position (round-robin over the palette).
pub fn color_for_index(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// Build grid-placed hotspots for an ordered keyword list.
pub fn hotspots_for_keywords(keywords: &[String]) -> Vec<Hotspot> {
    keywords
        .iter()
        .enumerate()
        .map(|(i, keyword)| Hotspot {
            id: new_id(),
            x: 15.0 + (i % 3) as f64 * 30.0,
            y: 20.0 + (i / 3) as f64 * 35.0,
            label: keyword.clone(),
            icon: icon_for_keyword(keyword).to_string(),
            color: color_for_index(i).to_string(),
            title: keyword.clone(),
            description: format!(
                "Learn more about {} and its role in this topic.",
                keyword.to_lowercase()
            ),
            fun_fact: None,
        })
        .collect()
}
