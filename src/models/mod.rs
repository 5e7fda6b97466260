//! Core data models for Livraria

pub mod book;
pub mod ids;

pub use book::{
    parse_price, parse_year, validate_price, validate_year, Book, BookValidationError, NewBook,
};
pub use ids::BookId;
