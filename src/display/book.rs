//! Book display formatting
//!
//! Formats books for terminal output in table and detail views.

use crate::models::Book;

/// Format a price with the configured currency symbol
pub fn format_price(price: f64, currency_symbol: &str) -> String {
    format!("{} {:.2}", currency_symbol, price)
}

/// Format a list of books as a table
pub fn format_book_list(books: &[Book], currency_symbol: &str) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    // Column widths count characters, titles are rarely ASCII-only
    let id_width = books
        .iter()
        .map(|b| b.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let title_width = books
        .iter()
        .map(|b| b.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let author_width = books
        .iter()
        .map(|b| b.author.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let prices: Vec<String> = books
        .iter()
        .map(|b| format_price(b.price, currency_symbol))
        .collect();
    let price_width = prices.iter().map(|p| p.chars().count()).max().unwrap_or(5).max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>id_width$}  {:<title_width$}  {:<author_width$}  {:>4}  {:>price_width$}\n",
        "ID",
        "Title",
        "Author",
        "Year",
        "Price",
        id_width = id_width,
        title_width = title_width,
        author_width = author_width,
        price_width = price_width,
    ));

    output.push_str(&format!(
        "{:->id_width$}  {:-<title_width$}  {:-<author_width$}  {:->4}  {:->price_width$}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
        title_width = title_width,
        author_width = author_width,
        price_width = price_width,
    ));

    for (book, price) in books.iter().zip(&prices) {
        output.push_str(&format!(
            "{:>id_width$}  {:<title_width$}  {:<author_width$}  {:>4}  {:>price_width$}\n",
            book.id.value(),
            book.title,
            book.author,
            book.year,
            price,
            id_width = id_width,
            title_width = title_width,
            author_width = author_width,
            price_width = price_width,
        ));
    }

    output.push_str(&format!("\nTotal: {} book(s)\n", books.len()));
    output
}

/// Format a single book's details
pub fn format_book_details(book: &Book, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Book: {}\n", book.title));
    output.push_str(&format!("  ID:     {}\n", book.id));
    output.push_str(&format!("  Author: {}\n", book.author));
    output.push_str(&format!("  Year:   {}\n", book.year));
    output.push_str(&format!(
        "  Price:  {}\n",
        format_price(book.price, currency_symbol)
    ));

    output
}
