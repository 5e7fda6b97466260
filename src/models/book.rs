//! Book model
//!
//! A book record as stored in the catalog, plus the unsaved form used when
//! creating one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BookId;
use crate::error::{LivrariaError, LivrariaResult};

/// Lowest accepted publication year
pub const MIN_YEAR: i32 = 0;

/// Highest accepted publication year
pub const MAX_YEAR: i32 = 9999;

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the store
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Author name(s)
    pub author: String,

    /// Publication year
    pub year: i32,

    /// Price, never negative
    pub price: f64,
}

impl Book {
    /// Attach an identifier to validated book data
    pub fn from_new(id: BookId, new_book: NewBook) -> Self {
        Self {
            id,
            title: new_book.title,
            author: new_book.author,
            year: new_book.year,
            price: new_book.price,
        }
    }

    /// Validate the record fields (the id is not checked)
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year, self.price)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.title, self.author, self.year)
    }
}

/// Book data that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub price: f64,
}

impl NewBook {
    /// Create new book data, trimming the text fields
    pub fn new(title: &str, author: &str, year: i32, price: f64) -> Self {
        Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            year,
            price,
        }
    }

    /// Validate the book data
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year, self.price)
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    year: i32,
    price: f64,
) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }

    if author.trim().is_empty() {
        return Err(BookValidationError::EmptyAuthor);
    }

    validate_year(year)?;
    validate_price(price)
}

/// Check that a publication year is within the accepted range
pub fn validate_year(year: i32) -> Result<(), BookValidationError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(BookValidationError::YearOutOfRange(year));
    }
    Ok(())
}

/// Check that a price is a finite, non-negative number
pub fn validate_price(price: f64) -> Result<(), BookValidationError> {
    if !price.is_finite() {
        return Err(BookValidationError::PriceNotFinite);
    }
    if price < 0.0 {
        return Err(BookValidationError::NegativePrice(price));
    }
    Ok(())
}

/// Validation errors for books
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    YearOutOfRange(i32),
    NegativePrice(f64),
    PriceNotFinite,
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title cannot be empty"),
            Self::EmptyAuthor => write!(f, "Author cannot be empty"),
            Self::YearOutOfRange(year) => write!(
                f,
                "Year {} is out of range ({}-{})",
                year, MIN_YEAR, MAX_YEAR
            ),
            Self::NegativePrice(price) => write!(f, "Price cannot be negative: {}", price),
            Self::PriceNotFinite => write!(f, "Price must be a finite number"),
        }
    }
}

impl std::error::Error for BookValidationError {}

impl From<BookValidationError> for LivrariaError {
    fn from(err: BookValidationError) -> Self {
        LivrariaError::Validation(err.to_string())
    }
}

/// Parse a publication year typed by the user or read from a file
pub fn parse_year(s: &str) -> LivrariaResult<i32> {
    let s = s.trim();
    s.parse::<i32>()
        .map_err(|_| LivrariaError::Validation(format!("Year must be an integer: '{}'", s)))
}

/// Parse a price, accepting either `.` or `,` as the decimal separator
pub fn parse_price(s: &str) -> LivrariaResult<f64> {
    let s = s.trim();
    let normalized = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.to_string()
    };

    let price = normalized
        .parse::<f64>()
        .map_err(|_| LivrariaError::Validation(format!("Price must be a number: '{}'", s)))?;

    validate_price(price)?;
    Ok(price)
}
