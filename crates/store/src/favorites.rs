use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::StoreError;
use crate::mirror::FileMirror;

/// On-disk document shape: a single object with a `favorites` array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesDocument {
    favorites: Vec<Book>,
}

/// Book snapshots marked for quick access, stored independently of the
/// catalog.
///
/// Each entry is a copy taken at add-time; later catalog edits or
/// deletes do not propagate here. Callers resolve the book against the
/// catalog before calling [`FavoritesStore::add`].
pub struct FavoritesStore {
    favorites: Mutex<Vec<Book>>,
    mirror: Option<FileMirror>,
}

impl FavoritesStore {
    /// A store without a file mirror; contents live for the process only.
    pub fn in_memory() -> Self {
        Self {
            favorites: Mutex::new(Vec::new()),
            mirror: None,
        }
    }

    /// Open a file-backed store, seeding from the file when it exists.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        let mirror = FileMirror::new(path);
        let document: FavoritesDocument = mirror.load()?.unwrap_or_default();

        tracing::debug!(
            path = %mirror.path().display(),
            favorites = document.favorites.len(),
            "favorites store opened"
        );

        Ok(Self {
            favorites: Mutex::new(document.favorites),
            mirror: Some(mirror),
        })
    }

    /// Return all favorites, in the order they were added.
    pub fn list(&self) -> Vec<Book> {
        self.guard().clone()
    }

    /// Add a book snapshot unless one with the same id is already
    /// present. Calling this twice with the same id keeps one entry.
    pub fn add(&self, book: Book) -> Result<(), StoreError> {
        let mut favorites = self.guard();
        if favorites.iter().any(|existing| existing.id == book.id) {
            return Ok(());
        }
        favorites.push(book);
        self.persist(&favorites)
    }

    /// Remove the favorite with the given id; a miss is a no-op.
    pub fn remove(&self, id: i64) -> Result<(), StoreError> {
        let mut favorites = self.guard();
        let before = favorites.len();
        favorites.retain(|book| book.id != id);
        if favorites.len() == before {
            return Ok(());
        }
        self.persist(&favorites)
    }

    fn persist(&self, favorites: &[Book]) -> Result<(), StoreError> {
        if let Some(mirror) = &self.mirror {
            mirror.save(&FavoritesDocument {
                favorites: favorites.to_vec(),
            })?;
        }
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Book>> {
        self.favorites.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookDraft;
    use crate::catalog::CatalogStore;

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441172719".to_string(),
            description: "Desert planet epic".to_string(),
            price: 12.5,
            stock_quantity: 3,
            published_date: "1965-08-01".to_string(),
            cover_image_url: "https://covers.example.com/dune.jpg".to_string(),
            category: "Science Fiction".to_string(),
        }
    }

    #[test]
    fn add_is_idempotent_by_id() {
        let store = FavoritesStore::in_memory();
        store.add(book(5, "Dune")).unwrap();
        store.add(book(5, "Dune")).unwrap();

        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn duplicate_add_keeps_the_first_snapshot() {
        let store = FavoritesStore::in_memory();
        store.add(book(5, "Dune")).unwrap();
        store.add(book(5, "Dune (renamed)")).unwrap();

        assert_eq!(store.list()[0].title, "Dune");
    }

    #[test]
    fn remove_of_absent_id_is_a_noop() {
        let store = FavoritesStore::in_memory();
        store.add(book(5, "Dune")).unwrap();

        store.remove(42).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn remove_drops_the_matching_entry() {
        let store = FavoritesStore::in_memory();
        store.add(book(5, "Dune")).unwrap();
        store.add(book(6, "Dune Messiah")).unwrap();

        store.remove(5).unwrap();
        let remaining = store.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 6);
    }

    #[test]
    fn favorite_survives_catalog_delete_as_a_snapshot() {
        let catalog = CatalogStore::in_memory();
        let favorites = FavoritesStore::in_memory();

        let added = catalog
            .add(BookDraft {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "978-0441172719".to_string(),
                description: "Desert planet epic".to_string(),
                price: 12.5,
                stock_quantity: 3,
                published_date: "1965-08-01".to_string(),
                cover_image_url: "https://covers.example.com/dune.jpg".to_string(),
                category: "Science Fiction".to_string(),
            })
            .unwrap();

        favorites.add(added.clone()).unwrap();
        catalog.remove(added.id).unwrap();

        assert!(catalog.get(added.id).is_err());
        assert_eq!(favorites.list(), vec![added]);
    }

    #[test]
    fn file_mirror_matches_collection_after_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let store = FavoritesStore::open(&path).unwrap();

        store.add(book(5, "Dune")).unwrap();
        let on_disk: FavoritesDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.favorites, store.list());

        store.remove(5).unwrap();
        let on_disk: FavoritesDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.favorites.is_empty());
    }

    #[test]
    fn reopening_seeds_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        {
            let store = FavoritesStore::open(&path).unwrap();
            store.add(book(5, "Dune")).unwrap();
        }

        let reopened = FavoritesStore::open(&path).unwrap();
        assert_eq!(reopened.list().len(), 1);
        assert_eq!(reopened.list()[0].id, 5);
    }
}
