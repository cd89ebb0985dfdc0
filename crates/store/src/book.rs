use serde::{Deserialize, Serialize};

/// A catalog book record.
///
/// Wire names are camelCase to match the JSON contract the browser
/// client expects (`stockQuantity`, `publishedDate`, `coverImageUrl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned by the catalog on creation
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    /// Publication date as an ISO-8601 string
    pub published_date: String,
    pub cover_image_url: String,
    pub category: String,
}

/// Request model for creating or replacing a book: every field except `id`.
///
/// An `id` field in the payload is ignored so clients that send the full
/// book back on update keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub published_date: String,
    pub cover_image_url: String,
    pub category: String,
}

impl BookDraft {
    /// Materialize the draft into a book with the given id.
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            published_date: self.published_date,
            cover_image_url: self.cover_image_url,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_with_camel_case_names() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441172719".to_string(),
            description: "Desert planet epic".to_string(),
            price: 12.5,
            stock_quantity: 3,
            published_date: "1965-08-01".to_string(),
            cover_image_url: "https://covers.example.com/dune.jpg".to_string(),
            category: "Science Fiction".to_string(),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["stockQuantity"], 3);
        assert_eq!(json["publishedDate"], "1965-08-01");
        assert_eq!(json["coverImageUrl"], "https://covers.example.com/dune.jpg");
    }

    #[test]
    fn draft_ignores_id_in_payload() {
        let draft: BookDraft = serde_json::from_value(serde_json::json!({
            "id": 99,
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "978-0441172719",
            "description": "Desert planet epic",
            "price": 12.5,
            "stockQuantity": 3,
            "publishedDate": "1965-08-01",
            "coverImageUrl": "https://covers.example.com/dune.jpg",
            "category": "Science Fiction"
        }))
        .unwrap();

        let book = draft.into_book(7);
        assert_eq!(book.id, 7);
        assert_eq!(book.title, "Dune");
    }
}
