// Colored terminal output for segmentation previews.
//
// This module handles all terminal-specific formatting. The main.rs
// command arms delegate here.

use colored::Colorize;

use crate::db::models::Topic;
use crate::output::truncate_chars;

/// Display a segmented topic list in the terminal.
pub fn display_topics(topics: &[Topic]) {
    println!(
        "\n{}",
        format!("=== Segmented into {} topic(s) ===", topics.len()).bold()
    );

    for (i, topic) in topics.iter().enumerate() {
        println!("\n  {}. {}", i + 1, topic.title.bold());
        if let Some(subtitle) = &topic.subtitle {
            println!("     {}", subtitle.dimmed());
        }
        println!("     {}", truncate_chars(topic.content.trim(), 120));

        if !topic.hotspots.is_empty() {
            println!(
                "     {}",
                format!("{} hotspot(s):", topic.hotspots.len()).dimmed()
            );
            for hotspot in &topic.hotspots {
                println!(
                    "       - {:<24} ({:>2.0}%, {:>2.0}%)  {} / {}",
                    hotspot.label,
                    hotspot.x,
                    hotspot.y,
                    hotspot.icon.dimmed(),
                    hotspot.color.dimmed(),
                );
            }
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use crate::output::truncate_chars;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_chars("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }
}
