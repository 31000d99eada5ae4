// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run. The content tables mirror the authoring
// model: chapters own topics, topics own hotspots and annotations, all
// related by cascading foreign keys so deleting a chapter removes its whole
// subtree. `order_index` columns preserve the sequence order the segmenter
// (or the author) produced.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Top-level authored units
        CREATE TABLE IF NOT EXISTS chapters (
            id TEXT PRIMARY KEY,               -- uuid v4
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Content sections within a chapter
        CREATE TABLE IF NOT EXISTS topics (
            id TEXT PRIMARY KEY,
            chapter_id TEXT NOT NULL REFERENCES chapters(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            subtitle TEXT,
            content TEXT NOT NULL,
            illustration TEXT,
            illustration_prompt TEXT,
            order_index INTEGER NOT NULL DEFAULT 0
        );

        -- Positioned points of interest on a topic's illustration
        CREATE TABLE IF NOT EXISTS hotspots (
            id TEXT PRIMARY KEY,
            topic_id TEXT NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
            x REAL NOT NULL,                   -- percentage position
            y REAL NOT NULL,
            label TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT 'sparkles',
            color TEXT NOT NULL DEFAULT 'primary',
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            fun_fact TEXT,
            order_index INTEGER NOT NULL DEFAULT 0
        );

        -- Freeform drawn overlays (arrow/box/text)
        CREATE TABLE IF NOT EXISTS annotations (
            id TEXT PRIMARY KEY,
            topic_id TEXT NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
            kind TEXT NOT NULL,                -- 'arrow' / 'box' / 'text'
            x REAL NOT NULL,
            y REAL NOT NULL,
            width REAL,
            height REAL,
            rotation REAL,
            text TEXT,
            color TEXT NOT NULL DEFAULT 'primary',
            end_x REAL,                        -- arrows only
            end_y REAL,
            order_index INTEGER NOT NULL DEFAULT 0
        );

        -- Client health pings
        CREATE TABLE IF NOT EXISTS status_checks (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        -- Index for loading a chapter's topics in order
        CREATE INDEX IF NOT EXISTS idx_topics_chapter
            ON topics(chapter_id);

        -- Index for loading a topic's hotspots
        CREATE INDEX IF NOT EXISTS idx_hotspots_topic
            ON hotspots(topic_id);

        -- Index for loading a topic's annotations
        CREATE INDEX IF NOT EXISTS idx_annotations_topic
            ON annotations(topic_id);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, chapters, topics, hotspots, annotations,
        // status_checks = 6 tables
        assert_eq!(count, 6i64);
    }

    #[test]
    fn test_cascade_delete_removes_subtree() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        create_tables(&conn).unwrap();

        conn.execute_batch(
            "
            INSERT INTO chapters (id, title, subject) VALUES ('c1', 'Ch', 'Bio');
            INSERT INTO topics (id, chapter_id, title, content) VALUES ('t1', 'c1', 'T', 'body');
            INSERT INTO hotspots (id, topic_id, x, y, label, title, description)
                VALUES ('h1', 't1', 15.0, 20.0, 'Leaf', 'Leaf', 'desc');
            INSERT INTO annotations (id, topic_id, kind, x, y)
                VALUES ('a1', 't1', 'arrow', 1.0, 2.0);
            ",
        )
        .unwrap();

        conn.execute("DELETE FROM chapters WHERE id = 'c1'", []).unwrap();

        let topics: i64 = conn
            .query_row("SELECT COUNT(*) FROM topics", [], |r| r.get(0))
            .unwrap();
        let hotspots: i64 = conn
            .query_row("SELECT COUNT(*) FROM hotspots", [], |r| r.get(0))
            .unwrap();
        let annotations: i64 = conn
            .query_row("SELECT COUNT(*) FROM annotations", [], |r| r.get(0))
            .unwrap();
        assert_eq!((topics, hotspots, annotations), (0, 0, 0));
    }
}
