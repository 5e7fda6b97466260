//! Change summaries for audit entries

use crate::models::Book;

/// Longest text value shown in a summary before it is cut
const MAX_TEXT_CHARS: usize = 40;

/// Describe the fields that differ between two versions of a book
///
/// Returns `None` when nothing changed.
pub fn book_diff(before: &Book, after: &Book) -> Option<String> {
    let mut changes = Vec::new();

    if before.title != after.title {
        changes.push(format!(
            "title: {} -> {}",
            quote(&before.title),
            quote(&after.title)
        ));
    }
    if before.author != after.author {
        changes.push(format!(
            "author: {} -> {}",
            quote(&before.author),
            quote(&after.author)
        ));
    }
    if before.year != after.year {
        changes.push(format!("year: {} -> {}", before.year, after.year));
    }
    if before.price != after.price {
        changes.push(format!("price: {:.2} -> {:.2}", before.price, after.price));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Quote a text value, truncating on a character boundary
fn quote(s: &str) -> String {
    if s.chars().count() > MAX_TEXT_CHARS {
        let cut: String = s.chars().take(MAX_TEXT_CHARS - 3).collect();
        format!("\"{}...\"", cut)
    } else {
        format!("\"{}\"", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookId, NewBook};

    fn book(title: &str, price: f64) -> Book {
        Book::from_new(
            BookId::new(1),
            NewBook::new(title, "Machado de Assis", 1899, price),
        )
    }

    #[test]
    fn test_price_change() {
        let diff = book_diff(&book("Dom Casmurro", 29.9), &book("Dom Casmurro", 24.9)).unwrap();
        assert_eq!(diff, "price: 29.90 -> 24.90");
    }

    #[test]
    fn test_no_changes() {
        assert!(book_diff(&book("Dom Casmurro", 29.9), &book("Dom Casmurro", 29.9)).is_none());
    }

    #[test]
    fn test_multiple_changes() {
        let diff = book_diff(&book("Helena", 10.0), &book("Iaiá Garcia", 12.0)).unwrap();
        assert!(diff.contains("title: \"Helena\" -> \"Iaiá Garcia\""));
        assert!(diff.contains("price: 10.00 -> 12.00"));
    }

    #[test]
    fn test_long_title_truncated_on_char_boundary() {
        let long_title = "ç".repeat(60);
        let diff = book_diff(&book(&long_title, 1.0), &book("curto", 1.0)).unwrap();
        assert!(diff.contains("...\""));
    }
}
