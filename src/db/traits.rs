// Database trait — backend-agnostic async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite). All methods are async so a
// native async backend could sit behind the same interface later.
//
// The trait mirrors the queries.rs function signatures, so handlers hold an
// `Arc<dyn Database>` and never see rusqlite types.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Annotation, Chapter, Hotspot, StatusCheck, Topic, TopicPatch};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Chapters ---

    /// Persist a chapter with its full topic/hotspot/annotation subtree.
    async fn insert_chapter(&self, chapter: &Chapter) -> Result<()>;

    /// Load chapters in insertion order, assembled, up to `limit`.
    async fn list_chapters(&self, limit: u32) -> Result<Vec<Chapter>>;

    /// Load a single chapter with its assembled subtree.
    async fn get_chapter(&self, id: &str) -> Result<Option<Chapter>>;

    /// Delete a chapter and (by cascade) everything under it.
    /// Returns false if no such chapter existed.
    async fn delete_chapter(&self, id: &str) -> Result<bool>;

    /// Count stored chapters.
    async fn count_chapters(&self) -> Result<i64>;

    // --- Topics ---

    /// Apply a partial update to a topic; returns the updated topic, or
    /// None if the topic doesn't exist under that chapter.
    async fn update_topic(
        &self,
        chapter_id: &str,
        topic_id: &str,
        patch: &TopicPatch,
    ) -> Result<Option<Topic>>;

    /// Append a hotspot to a topic. Returns false if the topic isn't in
    /// the given chapter.
    async fn add_hotspot(
        &self,
        chapter_id: &str,
        topic_id: &str,
        hotspot: &Hotspot,
    ) -> Result<bool>;

    /// Append an annotation to a topic. Returns false if the topic isn't
    /// in the given chapter.
    async fn add_annotation(
        &self,
        chapter_id: &str,
        topic_id: &str,
        annotation: &Annotation,
    ) -> Result<bool>;

    // --- Status checks ---

    /// Record a client health ping.
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<()>;

    /// Load status checks in insertion order, up to `limit`.
    async fn list_status_checks(&self, limit: u32) -> Result<Vec<StatusCheck>>;
}
