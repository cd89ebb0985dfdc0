use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::book::{Book, BookDraft};
use crate::error::StoreError;
use crate::mirror::FileMirror;

/// On-disk document shape: a single object with a `books` array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    books: Vec<Book>,
}

/// The authoritative collection of book records.
///
/// All operations run under a single mutex, so each request completes
/// against the collection (and its file mirror) before the next one
/// touches it. When a mirror is configured, every successful mutation
/// rewrites the backing file in full.
pub struct CatalogStore {
    books: Mutex<Vec<Book>>,
    mirror: Option<FileMirror>,
}

impl CatalogStore {
    /// A store without a file mirror; contents live for the process only.
    pub fn in_memory() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            mirror: None,
        }
    }

    /// Open a file-backed store, seeding from the file when it exists.
    ///
    /// A missing file starts the catalog empty; an unreadable or
    /// malformed file is an error for the caller to handle.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        let mirror = FileMirror::new(path);
        let document: CatalogDocument = mirror.load()?.unwrap_or_default();

        tracing::debug!(
            path = %mirror.path().display(),
            books = document.books.len(),
            "catalog store opened"
        );

        Ok(Self {
            books: Mutex::new(document.books),
            mirror: Some(mirror),
        })
    }

    /// Return all books, in insertion order.
    pub fn list(&self) -> Vec<Book> {
        self.guard().clone()
    }

    /// Find a book by id.
    pub fn get(&self, id: i64) -> Result<Book, StoreError> {
        self.guard()
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Find the first book with the given isbn. Isbns are not unique,
    /// so this is a linear scan returning the earliest match.
    pub fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        self.guard()
            .iter()
            .find(|book| book.isbn == isbn)
            .cloned()
            .ok_or_else(|| StoreError::IsbnNotFound(isbn.to_string()))
    }

    /// Append a new book, assigning the next free id (max + 1, from 1).
    pub fn add(&self, draft: BookDraft) -> Result<Book, StoreError> {
        let mut books = self.guard();
        let id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        let book = draft.into_book(id);
        books.push(book.clone());
        self.persist(&books)?;
        Ok(book)
    }

    /// Overwrite all fields of the book with the given id.
    pub fn update(&self, id: i64, draft: BookDraft) -> Result<Book, StoreError> {
        let mut books = self.guard();
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = draft.into_book(id);
        let book = slot.clone();
        self.persist(&books)?;
        Ok(book)
    }

    /// Remove the book with the given id; a miss is a no-op, not an error.
    pub fn remove(&self, id: i64) -> Result<(), StoreError> {
        let mut books = self.guard();
        let before = books.len();
        books.retain(|book| book.id != id);
        if books.len() == before {
            return Ok(());
        }
        self.persist(&books)
    }

    fn persist(&self, books: &[Book]) -> Result<(), StoreError> {
        if let Some(mirror) = &self.mirror {
            mirror.save(&CatalogDocument {
                books: books.to_vec(),
            })?;
        }
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Book>> {
        // A poisoned lock only means another request panicked mid-call;
        // the collection itself is still usable.
        self.books.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, isbn: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: "Frank Herbert".to_string(),
            isbn: isbn.to_string(),
            description: "Desert planet epic".to_string(),
            price: 12.5,
            stock_quantity: 3,
            published_date: "1965-08-01".to_string(),
            cover_image_url: "https://covers.example.com/dune.jpg".to_string(),
            category: "Science Fiction".to_string(),
        }
    }

    #[test]
    fn added_book_gets_positive_id_and_is_listed() {
        let store = CatalogStore::in_memory();
        let book = store.add(draft("Dune", "123")).unwrap();

        assert!(book.id > 0);
        assert_eq!(store.list(), vec![book]);
    }

    #[test]
    fn get_returns_the_added_book() {
        let store = CatalogStore::in_memory();
        let book = store.add(draft("Dune", "123")).unwrap();

        assert_eq!(store.get(book.id).unwrap(), book);
    }

    #[test]
    fn ids_are_not_reused_while_books_remain() {
        let store = CatalogStore::in_memory();
        let first = store.add(draft("Dune", "123")).unwrap();
        let second = store.add(draft("Dune Messiah", "456")).unwrap();
        assert_ne!(first.id, second.id);

        store.remove(first.id).unwrap();
        let third = store.add(draft("Children of Dune", "789")).unwrap();
        assert_ne!(third.id, second.id);
    }

    #[test]
    fn get_after_remove_is_not_found() {
        let store = CatalogStore::in_memory();
        let book = store.add(draft("Dune", "123")).unwrap();

        store.remove(book.id).unwrap();
        assert!(matches!(store.get(book.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn remove_of_absent_id_is_a_noop() {
        let store = CatalogStore::in_memory();
        store.add(draft("Dune", "123")).unwrap();

        store.remove(999).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_of_absent_id_fails_and_leaves_collection_unchanged() {
        let store = CatalogStore::in_memory();
        let book = store.add(draft("Dune", "123")).unwrap();

        let result = store.update(999, draft("Changed", "999"));
        assert!(matches!(result, Err(StoreError::NotFound(999))));
        assert_eq!(store.list(), vec![book]);
    }

    #[test]
    fn update_overwrites_every_field_in_place() {
        let store = CatalogStore::in_memory();
        let book = store.add(draft("Dune", "123")).unwrap();

        let mut replacement = draft("Dune (revised)", "124");
        replacement.price = 15.0;
        let updated = store.update(book.id, replacement).unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title, "Dune (revised)");
        assert_eq!(updated.price, 15.0);
        assert_eq!(store.get(book.id).unwrap(), updated);
    }

    #[test]
    fn isbn_lookup_returns_first_match() {
        let store = CatalogStore::in_memory();
        let first = store.add(draft("Dune", "123")).unwrap();
        store.add(draft("Dune reprint", "123")).unwrap();

        assert_eq!(store.get_by_isbn("123").unwrap(), first);
    }

    #[test]
    fn isbn_lookup_on_empty_catalog_is_not_found() {
        let store = CatalogStore::in_memory();
        assert!(matches!(
            store.get_by_isbn("000-absent"),
            Err(StoreError::IsbnNotFound(_))
        ));
    }

    #[test]
    fn file_mirror_matches_collection_after_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let store = CatalogStore::open(&path).unwrap();

        let book = store.add(draft("Dune", "123")).unwrap();
        let on_disk: CatalogDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.books, store.list());

        store.update(book.id, draft("Dune (revised)", "124")).unwrap();
        let on_disk: CatalogDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.books, store.list());

        store.remove(book.id).unwrap();
        let on_disk: CatalogDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(on_disk.books.is_empty());
    }

    #[test]
    fn reopening_seeds_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        let book = {
            let store = CatalogStore::open(&path).unwrap();
            store.add(draft("Dune", "123")).unwrap()
        };

        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.list(), vec![book.clone()]);

        // Ids keep counting from the seeded contents.
        let next = reopened.add(draft("Dune Messiah", "456")).unwrap();
        assert_eq!(next.id, book.id + 1);
    }

    #[test]
    fn opening_a_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            CatalogStore::open(&path),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn opening_with_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path().join("books.json")).unwrap();
        assert!(store.list().is_empty());
    }
}
