// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs remain usable against a Connection
// directly, which is how the in-file tests exercise them.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Annotation, Chapter, Hotspot, StatusCheck, Topic, TopicPatch};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_chapter(&self, chapter: &Chapter) -> Result<()> {
        let mut conn = self.conn.lock().await;
        super::queries::insert_chapter(&mut conn, chapter)
    }

    async fn list_chapters(&self, limit: u32) -> Result<Vec<Chapter>> {
        let conn = self.conn.lock().await;
        super::queries::list_chapters(&conn, limit)
    }

    async fn get_chapter(&self, id: &str) -> Result<Option<Chapter>> {
        let conn = self.conn.lock().await;
        super::queries::get_chapter(&conn, id)
    }

    async fn delete_chapter(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_chapter(&conn, id)
    }

    async fn count_chapters(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_chapters(&conn)
    }

    async fn update_topic(
        &self,
        chapter_id: &str,
        topic_id: &str,
        patch: &TopicPatch,
    ) -> Result<Option<Topic>> {
        let mut conn = self.conn.lock().await;
        super::queries::update_topic(&mut conn, chapter_id, topic_id, patch)
    }

    async fn add_hotspot(
        &self,
        chapter_id: &str,
        topic_id: &str,
        hotspot: &Hotspot,
    ) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::add_hotspot(&conn, chapter_id, topic_id, hotspot)
    }

    async fn add_annotation(
        &self,
        chapter_id: &str,
        topic_id: &str,
        annotation: &Annotation,
    ) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::add_annotation(&conn, chapter_id, topic_id, annotation)
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::insert_status_check(&conn, check)
    }

    async fn list_status_checks(&self, limit: u32) -> Result<Vec<StatusCheck>> {
        let conn = self.conn.lock().await;
        super::queries::list_status_checks(&conn, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::new_id;
    use crate::db::open_in_memory;

    fn test_db() -> SqliteDatabase {
        SqliteDatabase::new(open_in_memory().unwrap())
    }

    fn sample_chapter() -> Chapter {
        Chapter {
            id: new_id(),
            title: "Water Cycle".to_string(),
            subject: "Earth Science".to_string(),
            description: None,
            topics: vec![Topic {
                id: new_id(),
                title: "Evaporation".to_string(),
                subtitle: Some("Interactive Learning Content".to_string()),
                content: "Water rises as vapor.".to_string(),
                illustration: None,
                illustration_prompt: None,
                hotspots: vec![],
                annotations: vec![],
            }],
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_trait_chapter_roundtrip() {
        let db = test_db();
        let chapter = sample_chapter();
        db.insert_chapter(&chapter).await.unwrap();

        let loaded = db.get_chapter(&chapter.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Water Cycle");
        assert_eq!(loaded.topics.len(), 1);

        let all = db.list_chapters(100).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_trait_delete_chapter() {
        let db = test_db();
        let chapter = sample_chapter();
        db.insert_chapter(&chapter).await.unwrap();
        assert!(db.delete_chapter(&chapter.id).await.unwrap());
        assert!(db.get_chapter(&chapter.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_update_topic() {
        let db = test_db();
        let chapter = sample_chapter();
        db.insert_chapter(&chapter).await.unwrap();

        let patch = TopicPatch {
            content: Some("Vapor forms clouds.".to_string()),
            ..Default::default()
        };
        let updated = db
            .update_topic(&chapter.id, &chapter.topics[0].id, &patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "Vapor forms clouds.");
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db();
        assert_eq!(db.table_count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_trait_status_checks() {
        let db = test_db();
        let check = StatusCheck {
            id: new_id(),
            client_name: "editor".to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        };
        db.insert_status_check(&check).await.unwrap();
        let checks = db.list_status_checks(1000).await.unwrap();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].client_name, "editor");
    }
}
