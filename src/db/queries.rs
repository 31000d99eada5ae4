// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces. Chapters are written and read as whole subtrees: topics,
// hotspots, and annotations travel with their chapter, ordered by the
// `order_index` columns.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Annotation, Chapter, Hotspot, StatusCheck, Topic, TopicPatch};

// --- Chapters ---

/// Persist a chapter with its full topic/hotspot/annotation subtree.
/// Runs in a single transaction so a failed insert leaves nothing behind.
pub fn insert_chapter(conn: &mut Connection, chapter: &Chapter) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO chapters (id, title, subject, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            chapter.id,
            chapter.title,
            chapter.subject,
            chapter.description,
            chapter.created_at,
        ],
    )?;

    for (order, topic) in chapter.topics.iter().enumerate() {
        insert_topic_rows(&tx, &chapter.id, topic, order as i64)?;
    }

    tx.commit()?;
    Ok(())
}

/// Load a single chapter with its assembled subtree.
pub fn get_chapter(conn: &Connection, id: &str) -> Result<Option<Chapter>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, subject, description, created_at FROM chapters WHERE id = ?1",
    )?;
    let header = stmt
        .query_row(params![id], |row| {
            Ok(Chapter {
                id: row.get(0)?,
                title: row.get(1)?,
                subject: row.get(2)?,
                description: row.get(3)?,
                topics: Vec::new(),
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    match header {
        None => Ok(None),
        Some(mut chapter) => {
            chapter.topics = load_topics(conn, &chapter.id)?;
            Ok(Some(chapter))
        }
    }
}

/// Load chapters in insertion order, assembled, up to `limit`.
pub fn list_chapters(conn: &Connection, limit: u32) -> Result<Vec<Chapter>> {
    let mut stmt = conn.prepare("SELECT id FROM chapters ORDER BY rowid LIMIT ?1")?;
    let rows = stmt.query_map(params![limit], |row| row.get::<_, String>(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }

    let mut chapters = Vec::new();
    for id in ids {
        if let Some(chapter) = get_chapter(conn, &id)? {
            chapters.push(chapter);
        }
    }
    Ok(chapters)
}

/// Delete a chapter. Cascading foreign keys remove its topics, hotspots,
/// and annotations. Returns false if no such chapter existed.
pub fn delete_chapter(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM chapters WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Count stored chapters.
pub fn count_chapters(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM chapters", [], |row| row.get(0))?;
    Ok(count)
}

// --- Topics ---

/// Apply a partial update to a topic within a chapter.
///
/// Present fields overwrite; missing fields are left alone. A present
/// hotspot/annotation list replaces the stored set wholesale. Returns the
/// updated topic, or None if the topic doesn't exist under that chapter.
pub fn update_topic(
    conn: &mut Connection,
    chapter_id: &str,
    topic_id: &str,
    patch: &TopicPatch,
) -> Result<Option<Topic>> {
    let tx = conn.transaction()?;

    let exists: bool = tx.query_row(
        "SELECT COUNT(*) > 0 FROM topics WHERE id = ?1 AND chapter_id = ?2",
        params![topic_id, chapter_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(None);
    }

    if let Some(title) = &patch.title {
        tx.execute(
            "UPDATE topics SET title = ?1 WHERE id = ?2",
            params![title, topic_id],
        )?;
    }
    if let Some(subtitle) = &patch.subtitle {
        tx.execute(
            "UPDATE topics SET subtitle = ?1 WHERE id = ?2",
            params![subtitle, topic_id],
        )?;
    }
    if let Some(content) = &patch.content {
        tx.execute(
            "UPDATE topics SET content = ?1 WHERE id = ?2",
            params![content, topic_id],
        )?;
    }
    if let Some(illustration) = &patch.illustration {
        tx.execute(
            "UPDATE topics SET illustration = ?1 WHERE id = ?2",
            params![illustration, topic_id],
        )?;
    }

    if let Some(hotspots) = &patch.hotspots {
        tx.execute("DELETE FROM hotspots WHERE topic_id = ?1", params![topic_id])?;
        for (order, hotspot) in hotspots.iter().enumerate() {
            insert_hotspot_row(&tx, topic_id, hotspot, order as i64)?;
        }
    }
    if let Some(annotations) = &patch.annotations {
        tx.execute(
            "DELETE FROM annotations WHERE topic_id = ?1",
            params![topic_id],
        )?;
        for (order, annotation) in annotations.iter().enumerate() {
            insert_annotation_row(&tx, topic_id, annotation, order as i64)?;
        }
    }

    tx.commit()?;
    load_topic(conn, topic_id)
}

/// Append a hotspot to a topic. Returns false if the topic isn't in the
/// given chapter.
pub fn add_hotspot(
    conn: &Connection,
    chapter_id: &str,
    topic_id: &str,
    hotspot: &Hotspot,
) -> Result<bool> {
    if !topic_in_chapter(conn, chapter_id, topic_id)? {
        return Ok(false);
    }
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(order_index) + 1, 0) FROM hotspots WHERE topic_id = ?1",
        params![topic_id],
        |row| row.get(0),
    )?;
    insert_hotspot_row(conn, topic_id, hotspot, next)?;
    Ok(true)
}

/// Append an annotation to a topic. Returns false if the topic isn't in
/// the given chapter.
pub fn add_annotation(
    conn: &Connection,
    chapter_id: &str,
    topic_id: &str,
    annotation: &Annotation,
) -> Result<bool> {
    if !topic_in_chapter(conn, chapter_id, topic_id)? {
        return Ok(false);
    }
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(order_index) + 1, 0) FROM annotations WHERE topic_id = ?1",
        params![topic_id],
        |row| row.get(0),
    )?;
    insert_annotation_row(conn, topic_id, annotation, next)?;
    Ok(true)
}

// --- Status checks ---

/// Record a client health ping.
pub fn insert_status_check(conn: &Connection, check: &StatusCheck) -> Result<()> {
    conn.execute(
        "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
        params![check.id, check.client_name, check.timestamp],
    )?;
    Ok(())
}

/// Load status checks in insertion order, up to `limit`.
pub fn list_status_checks(conn: &Connection, limit: u32) -> Result<Vec<StatusCheck>> {
    let mut stmt = conn
        .prepare("SELECT id, client_name, timestamp FROM status_checks ORDER BY rowid LIMIT ?1")?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(StatusCheck {
            id: row.get(0)?,
            client_name: row.get(1)?,
            timestamp: row.get(2)?,
        })
    })?;

    let mut checks = Vec::new();
    for row in rows {
        checks.push(row?);
    }
    Ok(checks)
}

// --- Row helpers ---

fn insert_topic_rows(
    conn: &Connection,
    chapter_id: &str,
    topic: &Topic,
    order_index: i64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO topics
            (id, chapter_id, title, subtitle, content, illustration,
             illustration_prompt, order_index)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            topic.id,
            chapter_id,
            topic.title,
            topic.subtitle,
            topic.content,
            topic.illustration,
            topic.illustration_prompt,
            order_index,
        ],
    )?;

    for (order, hotspot) in topic.hotspots.iter().enumerate() {
        insert_hotspot_row(conn, &topic.id, hotspot, order as i64)?;
    }
    for (order, annotation) in topic.annotations.iter().enumerate() {
        insert_annotation_row(conn, &topic.id, annotation, order as i64)?;
    }
    Ok(())
}

fn insert_hotspot_row(
    conn: &Connection,
    topic_id: &str,
    hotspot: &Hotspot,
    order_index: i64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO hotspots
            (id, topic_id, x, y, label, icon, color, title, description,
             fun_fact, order_index)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            hotspot.id,
            topic_id,
            hotspot.x,
            hotspot.y,
            hotspot.label,
            hotspot.icon,
            hotspot.color,
            hotspot.title,
            hotspot.description,
            hotspot.fun_fact,
            order_index,
        ],
    )?;
    Ok(())
}

fn insert_annotation_row(
    conn: &Connection,
    topic_id: &str,
    annotation: &Annotation,
    order_index: i64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO annotations
            (id, topic_id, kind, x, y, width, height, rotation, text, color,
             end_x, end_y, order_index)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            annotation.id,
            topic_id,
            annotation.kind,
            annotation.x,
            annotation.y,
            annotation.width,
            annotation.height,
            annotation.rotation,
            annotation.text,
            annotation.color,
            annotation.end_x,
            annotation.end_y,
            order_index,
        ],
    )?;
    Ok(())
}

fn topic_in_chapter(conn: &Connection, chapter_id: &str, topic_id: &str) -> Result<bool> {
    let found: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM topics WHERE id = ?1 AND chapter_id = ?2",
        params![topic_id, chapter_id],
        |row| row.get(0),
    )?;
    Ok(found)
}

fn load_topic(conn: &Connection, topic_id: &str) -> Result<Option<Topic>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, subtitle, content, illustration, illustration_prompt
         FROM topics WHERE id = ?1",
    )?;
    let topic = stmt
        .query_row(params![topic_id], |row| {
            Ok(Topic {
                id: row.get(0)?,
                title: row.get(1)?,
                subtitle: row.get(2)?,
                content: row.get(3)?,
                illustration: row.get(4)?,
                illustration_prompt: row.get(5)?,
                hotspots: Vec::new(),
                annotations: Vec::new(),
            })
        })
        .optional()?;

    match topic {
        None => Ok(None),
        Some(mut topic) => {
            topic.hotspots = load_hotspots(conn, &topic.id)?;
            topic.annotations = load_annotations(conn, &topic.id)?;
            Ok(Some(topic))
        }
    }
}

fn load_topics(conn: &Connection, chapter_id: &str) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, subtitle, content, illustration, illustration_prompt
         FROM topics WHERE chapter_id = ?1 ORDER BY order_index",
    )?;
    let rows = stmt.query_map(params![chapter_id], |row| {
        Ok(Topic {
            id: row.get(0)?,
            title: row.get(1)?,
            subtitle: row.get(2)?,
            content: row.get(3)?,
            illustration: row.get(4)?,
            illustration_prompt: row.get(5)?,
            hotspots: Vec::new(),
            annotations: Vec::new(),
        })
    })?;

    let mut topics = Vec::new();
    for row in rows {
        topics.push(row?);
    }
    for topic in &mut topics {
        topic.hotspots = load_hotspots(conn, &topic.id)?;
        topic.annotations = load_annotations(conn, &topic.id)?;
    }
    Ok(topics)
}

fn load_hotspots(conn: &Connection, topic_id: &str) -> Result<Vec<Hotspot>> {
    let mut stmt = conn.prepare(
        "SELECT id, x, y, label, icon, color, title, description, fun_fact
         FROM hotspots WHERE topic_id = ?1 ORDER BY order_index",
    )?;
    let rows = stmt.query_map(params![topic_id], |row| {
        Ok(Hotspot {
            id: row.get(0)?,
            x: row.get(1)?,
            y: row.get(2)?,
            label: row.get(3)?,
            icon: row.get(4)?,
            color: row.get(5)?,
            title: row.get(6)?,
            description: row.get(7)?,
            fun_fact: row.get(8)?,
        })
    })?;

    let mut hotspots = Vec::new();
    for row in rows {
        hotspots.push(row?);
    }
    Ok(hotspots)
}

fn load_annotations(conn: &Connection, topic_id: &str) -> Result<Vec<Annotation>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, x, y, width, height, rotation, text, color, end_x, end_y
         FROM annotations WHERE topic_id = ?1 ORDER BY order_index",
    )?;
    let rows = stmt.query_map(params![topic_id], |row| {
        Ok(Annotation {
            id: row.get(0)?,
            kind: row.get(1)?,
            x: row.get(2)?,
            y: row.get(3)?,
            width: row.get(4)?,
            height: row.get(5)?,
            rotation: row.get(6)?,
            text: row.get(7)?,
            color: row.get(8)?,
            end_x: row.get(9)?,
            end_y: row.get(10)?,
        })
    })?;

    let mut annotations = Vec::new();
    for row in rows {
        annotations.push(row?);
    }
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::new_id;
    use crate::db::open_in_memory;

    fn test_db() -> Connection {
        open_in_memory().unwrap()
    }

    fn sample_hotspot(label: &str) -> Hotspot {
        Hotspot {
            id: new_id(),
            x: 15.0,
            y: 20.0,
            label: label.to_string(),
            icon: "leaf".to_string(),
            color: "primary".to_string(),
            title: label.to_string(),
            description: format!("Learn more about {label}."),
            fun_fact: None,
        }
    }

    fn sample_chapter() -> Chapter {
        Chapter {
            id: new_id(),
            title: "Photosynthesis".to_string(),
            subject: "Biology".to_string(),
            description: Some("Light into sugar".to_string()),
            topics: vec![
                Topic {
                    id: new_id(),
                    title: "Light Reactions".to_string(),
                    subtitle: Some("Interactive Learning Content".to_string()),
                    content: "Chlorophyll absorbs light.".to_string(),
                    illustration: None,
                    illustration_prompt: None,
                    hotspots: vec![sample_hotspot("Chlorophyll"), sample_hotspot("Thylakoid")],
                    annotations: vec![],
                },
                Topic {
                    id: new_id(),
                    title: "Calvin Cycle".to_string(),
                    subtitle: Some("Interactive Learning Content".to_string()),
                    content: "Carbon fixation happens here.".to_string(),
                    illustration: None,
                    illustration_prompt: None,
                    hotspots: vec![],
                    annotations: vec![],
                },
            ],
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_chapter_roundtrip_preserves_order() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();

        let loaded = get_chapter(&conn, &chapter.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Photosynthesis");
        assert_eq!(loaded.description.as_deref(), Some("Light into sugar"));
        assert_eq!(loaded.topics.len(), 2);
        assert_eq!(loaded.topics[0].title, "Light Reactions");
        assert_eq!(loaded.topics[1].title, "Calvin Cycle");
        assert_eq!(loaded.topics[0].hotspots.len(), 2);
        assert_eq!(loaded.topics[0].hotspots[0].label, "Chlorophyll");
        assert_eq!(loaded.topics[0].hotspots[1].label, "Thylakoid");
    }

    #[test]
    fn test_get_chapter_missing() {
        let conn = test_db();
        assert!(get_chapter(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn test_list_chapters_insertion_order() {
        let mut conn = test_db();
        let mut first = sample_chapter();
        first.title = "First".to_string();
        let mut second = sample_chapter();
        second.id = new_id();
        second.title = "Second".to_string();

        insert_chapter(&mut conn, &first).unwrap();
        insert_chapter(&mut conn, &second).unwrap();

        let chapters = list_chapters(&conn, 100).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "First");
        assert_eq!(chapters[1].title, "Second");

        let limited = list_chapters(&conn, 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].title, "First");
    }

    #[test]
    fn test_delete_chapter_cascades() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();

        assert!(delete_chapter(&conn, &chapter.id).unwrap());
        assert!(!delete_chapter(&conn, &chapter.id).unwrap());

        let topics: i64 = conn
            .query_row("SELECT COUNT(*) FROM topics", [], |r| r.get(0))
            .unwrap();
        let hotspots: i64 = conn
            .query_row("SELECT COUNT(*) FROM hotspots", [], |r| r.get(0))
            .unwrap();
        assert_eq!((topics, hotspots), (0, 0));
    }

    #[test]
    fn test_update_topic_partial_fields() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();
        let topic_id = chapter.topics[0].id.clone();

        let patch = TopicPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = update_topic(&mut conn, &chapter.id, &topic_id, &patch)
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        // Untouched fields survive
        assert_eq!(updated.content, "Chlorophyll absorbs light.");
        assert_eq!(updated.hotspots.len(), 2);
    }

    #[test]
    fn test_update_topic_replaces_hotspot_set() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();
        let topic_id = chapter.topics[0].id.clone();

        let patch = TopicPatch {
            hotspots: Some(vec![sample_hotspot("Granum")]),
            ..Default::default()
        };
        let updated = update_topic(&mut conn, &chapter.id, &topic_id, &patch)
            .unwrap()
            .unwrap();

        assert_eq!(updated.hotspots.len(), 1);
        assert_eq!(updated.hotspots[0].label, "Granum");
    }

    #[test]
    fn test_update_topic_wrong_chapter() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();
        let topic_id = chapter.topics[0].id.clone();

        let patch = TopicPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let result = update_topic(&mut conn, "other-chapter", &topic_id, &patch).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_add_hotspot_appends_in_order() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();
        let topic_id = chapter.topics[0].id.clone();

        assert!(add_hotspot(&conn, &chapter.id, &topic_id, &sample_hotspot("Stroma")).unwrap());

        let topic = load_topic(&conn, &topic_id).unwrap().unwrap();
        assert_eq!(topic.hotspots.len(), 3);
        assert_eq!(topic.hotspots[2].label, "Stroma");
    }

    #[test]
    fn test_add_hotspot_missing_topic() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();

        let added = add_hotspot(&conn, &chapter.id, "no-such-topic", &sample_hotspot("X")).unwrap();
        assert!(!added);
    }

    #[test]
    fn test_add_annotation() {
        let mut conn = test_db();
        let chapter = sample_chapter();
        insert_chapter(&mut conn, &chapter).unwrap();
        let topic_id = chapter.topics[1].id.clone();

        let annotation = Annotation {
            id: new_id(),
            kind: "arrow".to_string(),
            x: 10.0,
            y: 10.0,
            width: None,
            height: None,
            rotation: Some(0.0),
            text: None,
            color: "accent".to_string(),
            end_x: Some(40.0),
            end_y: Some(60.0),
        };
        assert!(add_annotation(&conn, &chapter.id, &topic_id, &annotation).unwrap());

        let topic = load_topic(&conn, &topic_id).unwrap().unwrap();
        assert_eq!(topic.annotations.len(), 1);
        assert_eq!(topic.annotations[0].kind, "arrow");
        assert_eq!(topic.annotations[0].end_x, Some(40.0));
    }

    #[test]
    fn test_count_chapters() {
        let mut conn = test_db();
        assert_eq!(count_chapters(&conn).unwrap(), 0);
        insert_chapter(&mut conn, &sample_chapter()).unwrap();
        assert_eq!(count_chapters(&conn).unwrap(), 1);
    }

    #[test]
    fn test_status_check_roundtrip() {
        let conn = test_db();
        assert!(list_status_checks(&conn, 1000).unwrap().is_empty());

        let check = StatusCheck {
            id: new_id(),
            client_name: "reader-app".to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        };
        insert_status_check(&conn, &check).unwrap();

        let checks = list_status_checks(&conn, 1000).unwrap();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].client_name, "reader-app");
    }
}
