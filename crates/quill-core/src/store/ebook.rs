//! Ebook store and chapter ordering
//!
//! Chapter `order` is dense and zero-based: after every structural change
//! (add, delete, reorder) the whole `order` column is re-derived from array
//! position. Re-derivation, not incremental patching, is what keeps the
//! invariant unconditional.

use std::collections::HashSet;

use uuid::Uuid;

use super::{Collection, StoreError, StoreResult};
use crate::config::Config;
use crate::models::{Chapter, ChapterPatch, Ebook, EbookPatch, Entity};
use crate::storage::JsonPersistence;

/// Store for ebooks and their chapters
pub struct EbookStore {
    collection: Collection<Ebook>,
}

impl EbookStore {
    /// Open the store, loading any existing ebooks from disk
    pub fn open(config: &Config) -> StoreResult<Self> {
        let persistence = JsonPersistence::new(config.store_path(Ebook::STORE));
        Ok(Self {
            collection: Collection::open(persistence)?,
        })
    }

    /// Add a new ebook
    pub fn add_ebook(&mut self, ebook: Ebook) -> StoreResult<()> {
        self.collection.add(ebook)
    }

    /// Apply a partial update to an existing ebook
    pub fn update_ebook(&mut self, id: Uuid, patch: EbookPatch) -> StoreResult<Ebook> {
        self.collection.update(id, |ebook| patch.apply(ebook))
    }

    /// Delete an ebook and, with it, all of its chapters.
    /// Returns whether an ebook was removed.
    pub fn delete_ebook(&mut self, id: Uuid) -> StoreResult<bool> {
        self.collection.delete(id)
    }

    /// Get an ebook by id
    pub fn get_ebook(&self, id: Uuid) -> Option<&Ebook> {
        self.collection.get(id)
    }

    /// All ebooks, most-recent-first
    pub fn ebooks(&self) -> &[Ebook] {
        self.collection.list()
    }

    /// Number of ebooks
    pub fn ebook_count(&self) -> usize {
        self.collection.len()
    }

    // ==================== Chapter Operations ====================

    /// Append a chapter to an ebook.
    ///
    /// The chapter's `order` is re-derived from its final position, along
    /// with every other chapter's, so any caller-supplied `order` value on
    /// the incoming chapter is irrelevant.
    pub fn add_chapter(&mut self, ebook_id: Uuid, chapter: Chapter) -> StoreResult<Ebook> {
        self.collection.update(ebook_id, |ebook| {
            ebook.chapters.push(chapter);
            renumber(&mut ebook.chapters);
        })
    }

    /// Apply a partial update to one chapter. `order` is not patchable.
    pub fn update_chapter(
        &mut self,
        ebook_id: Uuid,
        chapter_id: Uuid,
        patch: ChapterPatch,
    ) -> StoreResult<Ebook> {
        let ebook = self
            .collection
            .get(ebook_id)
            .ok_or(StoreError::NotFound { id: ebook_id })?;
        if ebook.chapter(chapter_id).is_none() {
            return Err(StoreError::ChapterNotFound {
                ebook_id,
                chapter_id,
            });
        }

        self.collection.update(ebook_id, |ebook| {
            if let Some(chapter) = ebook.chapters.iter_mut().find(|c| c.id == chapter_id) {
                patch.apply(chapter);
            }
        })
    }

    /// Remove a chapter and close the gap in `order`.
    ///
    /// Idempotent on a missing chapter id: the ebook is left untouched
    /// (including `updated_at`) and `Ok(false)` is returned.
    pub fn delete_chapter(&mut self, ebook_id: Uuid, chapter_id: Uuid) -> StoreResult<bool> {
        let ebook = self
            .collection
            .get(ebook_id)
            .ok_or(StoreError::NotFound { id: ebook_id })?;
        if ebook.chapter(chapter_id).is_none() {
            return Ok(false);
        }

        self.collection.update(ebook_id, |ebook| {
            ebook.chapters.retain(|c| c.id != chapter_id);
            renumber(&mut ebook.chapters);
        })?;
        Ok(true)
    }

    /// Reorder chapters to match the given id sequence.
    ///
    /// The input must be an exact permutation of the current chapter ids:
    /// an unknown, missing, or duplicated id is rejected with
    /// `InvalidReorder` and nothing is mutated.
    pub fn reorder_chapters(&mut self, ebook_id: Uuid, ordered_ids: &[Uuid]) -> StoreResult<Ebook> {
        let ebook = self
            .collection
            .get(ebook_id)
            .ok_or(StoreError::NotFound { id: ebook_id })?;
        validate_permutation(&ebook.chapters, ordered_ids)?;

        let ordered_ids = ordered_ids.to_vec();
        self.collection.update(ebook_id, move |ebook| {
            let mut reordered = Vec::with_capacity(ordered_ids.len());
            for id in &ordered_ids {
                if let Some(position) = ebook.chapters.iter().position(|c| c.id == *id) {
                    reordered.push(ebook.chapters.swap_remove(position));
                }
            }
            ebook.chapters = reordered;
            renumber(&mut ebook.chapters);
        })
    }
}

/// Re-derive every chapter's `order` from its array position
fn renumber(chapters: &mut [Chapter]) {
    for (position, chapter) in chapters.iter_mut().enumerate() {
        chapter.order = position as u32;
    }
}

/// Check that `ordered_ids` is an exact permutation of the chapter ids
fn validate_permutation(chapters: &[Chapter], ordered_ids: &[Uuid]) -> StoreResult<()> {
    if ordered_ids.len() != chapters.len() {
        return Err(StoreError::InvalidReorder {
            reason: format!(
                "expected {} chapter ids, got {}",
                chapters.len(),
                ordered_ids.len()
            ),
        });
    }

    let mut seen = HashSet::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if !seen.insert(*id) {
            return Err(StoreError::InvalidReorder {
                reason: format!("duplicate chapter id {}", id),
            });
        }
        if !chapters.iter().any(|c| c.id == *id) {
            return Err(StoreError::InvalidReorder {
                reason: format!("unknown chapter id {}", id),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    fn store_with_ebook(temp_dir: &TempDir) -> (EbookStore, Uuid) {
        let mut store = EbookStore::open(&test_config(temp_dir)).unwrap();
        let ebook = Ebook::new("Book");
        let id = ebook.id;
        store.add_ebook(ebook).unwrap();
        (store, id)
    }

    fn orders(store: &EbookStore, ebook_id: Uuid) -> Vec<u32> {
        store
            .get_ebook(ebook_id)
            .unwrap()
            .chapters
            .iter()
            .map(|c| c.order)
            .collect()
    }

    fn titles(store: &EbookStore, ebook_id: Uuid) -> Vec<String> {
        store
            .get_ebook(ebook_id)
            .unwrap()
            .chapters
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    #[test]
    fn test_add_chapter_assigns_dense_order() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        // Caller-supplied order is overwritten on insert
        let mut rogue = Chapter::new("A");
        rogue.order = 42;
        store.add_chapter(ebook_id, rogue).unwrap();
        store.add_chapter(ebook_id, Chapter::new("B")).unwrap();
        store.add_chapter(ebook_id, Chapter::new("C")).unwrap();

        assert_eq!(orders(&store, ebook_id), vec![0, 1, 2]);
        assert_eq!(titles(&store, ebook_id), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_delete_chapter_closes_the_gap() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        store.add_chapter(ebook_id, Chapter::new("A")).unwrap();
        let b = Chapter::new("B");
        let b_id = b.id;
        store.add_chapter(ebook_id, b).unwrap();
        store.add_chapter(ebook_id, Chapter::new("D")).unwrap();

        assert!(store.delete_chapter(ebook_id, b_id).unwrap());

        assert_eq!(titles(&store, ebook_id), vec!["A", "D"]);
        assert_eq!(orders(&store, ebook_id), vec![0, 1]);
    }

    #[test]
    fn test_delete_chapter_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        store.add_chapter(ebook_id, Chapter::new("A")).unwrap();
        let updated_at = store.get_ebook(ebook_id).unwrap().updated_at;

        assert!(!store.delete_chapter(ebook_id, Uuid::new_v4()).unwrap());
        assert_eq!(store.get_ebook(ebook_id).unwrap().chapters.len(), 1);
        // A no-op delete does not touch the ebook
        assert_eq!(store.get_ebook(ebook_id).unwrap().updated_at, updated_at);
    }

    #[test]
    fn test_reorder_chapters() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let a = Chapter::new("A");
        let b = Chapter::new("B");
        let c = Chapter::new("C");
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        store.add_chapter(ebook_id, a).unwrap();
        store.add_chapter(ebook_id, b).unwrap();
        store.add_chapter(ebook_id, c).unwrap();

        store
            .reorder_chapters(ebook_id, &[c_id, a_id, b_id])
            .unwrap();

        assert_eq!(titles(&store, ebook_id), vec!["C", "A", "B"]);
        assert_eq!(orders(&store, ebook_id), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_rejects_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let a = Chapter::new("A");
        let a_id = a.id;
        store.add_chapter(ebook_id, a).unwrap();

        let result = store.reorder_chapters(ebook_id, &[Uuid::new_v4()]);
        assert!(matches!(result, Err(StoreError::InvalidReorder { .. })));
        // Nothing mutated
        assert_eq!(titles(&store, ebook_id), vec!["A"]);
        assert_eq!(store.get_ebook(ebook_id).unwrap().chapters[0].id, a_id);
    }

    #[test]
    fn test_reorder_rejects_missing_and_duplicate_ids() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let a = Chapter::new("A");
        let a_id = a.id;
        store.add_chapter(ebook_id, a).unwrap();
        store.add_chapter(ebook_id, Chapter::new("B")).unwrap();

        // Too short
        let result = store.reorder_chapters(ebook_id, &[a_id]);
        assert!(matches!(result, Err(StoreError::InvalidReorder { .. })));

        // Duplicated
        let result = store.reorder_chapters(ebook_id, &[a_id, a_id]);
        assert!(matches!(result, Err(StoreError::InvalidReorder { .. })));

        assert_eq!(titles(&store, ebook_id), vec!["A", "B"]);
    }

    #[test]
    fn test_order_stays_dense_across_mixed_operations() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let a = Chapter::new("A");
        let b = Chapter::new("B");
        let (a_id, b_id) = (a.id, b.id);
        store.add_chapter(ebook_id, a).unwrap();
        store.add_chapter(ebook_id, b).unwrap();

        let d = Chapter::new("D");
        let d_id = d.id;
        store.add_chapter(ebook_id, d).unwrap();
        assert_eq!(orders(&store, ebook_id), vec![0, 1, 2]);

        store.delete_chapter(ebook_id, b_id).unwrap();
        assert_eq!(titles(&store, ebook_id), vec!["A", "D"]);
        assert_eq!(orders(&store, ebook_id), vec![0, 1]);

        store.reorder_chapters(ebook_id, &[d_id, a_id]).unwrap();
        assert_eq!(titles(&store, ebook_id), vec!["D", "A"]);
        assert_eq!(orders(&store, ebook_id), vec![0, 1]);
    }

    #[test]
    fn test_update_chapter_merges() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let mut chapter = Chapter::new("Working title");
        chapter.set_content("Body");
        let chapter_id = chapter.id;
        store.add_chapter(ebook_id, chapter).unwrap();

        let patch = ChapterPatch {
            title: Some("Final title".to_string()),
            ..Default::default()
        };
        let ebook = store.update_chapter(ebook_id, chapter_id, patch).unwrap();

        let chapter = ebook.chapter(chapter_id).unwrap();
        assert_eq!(chapter.title, "Final title");
        assert_eq!(chapter.content, "Body");
        assert_eq!(chapter.order, 0);
    }

    #[test]
    fn test_update_chapter_missing_chapter_errors() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        let result = store.update_chapter(ebook_id, Uuid::new_v4(), ChapterPatch::default());
        assert!(matches!(result, Err(StoreError::ChapterNotFound { .. })));
    }

    #[test]
    fn test_chapter_ops_on_missing_ebook_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = EbookStore::open(&test_config(&temp_dir)).unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            store.add_chapter(missing, Chapter::new("A")),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete_chapter(missing, Uuid::new_v4()),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.reorder_chapters(missing, &[]),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_deleting_ebook_deletes_chapters() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, ebook_id) = store_with_ebook(&temp_dir);

        store.add_chapter(ebook_id, Chapter::new("A")).unwrap();
        assert!(store.delete_ebook(ebook_id).unwrap());
        assert!(store.get_ebook(ebook_id).is_none());
        assert_eq!(store.ebook_count(), 0);
    }

    #[test]
    fn test_chapters_persist_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let ebook_id;
        {
            let mut store = EbookStore::open(&config).unwrap();
            let ebook = Ebook::new("Book");
            ebook_id = ebook.id;
            store.add_ebook(ebook).unwrap();
            store.add_chapter(ebook_id, Chapter::new("One")).unwrap();
            store.add_chapter(ebook_id, Chapter::new("Two")).unwrap();
        }

        let store = EbookStore::open(&config).unwrap();
        assert_eq!(titles(&store, ebook_id), vec!["One", "Two"]);
        assert_eq!(orders(&store, ebook_id), vec![0, 1]);
    }
}
