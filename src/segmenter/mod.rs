// Content segmenter — deterministic splitting of raw prose into topics
// with auto-placed keyword hotspots.
//
// Two splitting strategies, applied exclusively: markdown "## " headers
// first; blank-line paragraphs only when no header was found. Section
// indices are assigned before empty sections are dropped, so synthesized
// "Topic {n}" titles keep the raw loop position.
//
// The whole pass is a pure function of the input string (modulo fresh ids).
// Persistence belongs to the caller.

pub mod hotspots;
pub mod keywords;

use crate::db::models::{new_id, Topic};

/// Fixed subtitle for every segmenter-built topic.
pub const TOPIC_SUBTITLE: &str = "Interactive Learning Content";

/// Cap on auto-placed hotspots per topic.
pub const MAX_HOTSPOTS: usize = 6;

/// Split raw content into an ordered sequence of topics.
///
/// Never fails: empty or all-whitespace input yields the single
/// "Introduction" fallback topic carrying the original content untouched.
pub fn segment(content: &str) -> Vec<Topic> {
    let mut sections: Vec<&str> = content.split("\n## ").collect();
    if sections.len() == 1 {
        // No headers found — fall back to paragraph boundaries
        sections = content.split("\n\n").collect();
    }

    let mut topics = Vec::new();

    for (idx, section) in sections.iter().enumerate() {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let lines: Vec<&str> = section.split('\n').collect();
        let stripped = lines[0].replace('#', "");
        let stripped = stripped.trim();
        let title = if stripped.is_empty() {
            format!("Topic {}", idx + 1)
        } else {
            stripped.to_string()
        };

        let body = if lines.len() > 1 {
            lines[1..].join("\n").trim().to_string()
        } else {
            section.to_string()
        };

        let mut extracted = keywords::extract_keywords(&body);
        extracted.truncate(MAX_HOTSPOTS);
        let hotspots = hotspots::hotspots_for_keywords(&extracted);

        topics.push(Topic {
            id: new_id(),
            title,
            subtitle: Some(TOPIC_SUBTITLE.to_string()),
            content: body,
            illustration: None,
            illustration_prompt: None,
            hotspots,
            annotations: Vec::new(),
        });
    }

    if topics.is_empty() {
        return vec![Topic {
            id: new_id(),
            title: "Introduction".to_string(),
            subtitle: Some("Getting Started".to_string()),
            content: content.to_string(),
            illustration: None,
            illustration_prompt: None,
            hotspots: Vec::new(),
            annotations: Vec::new(),
        }];
    }

    topics
}
