//! Book CLI commands
//!
//! Implements CLI commands for catalog management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::book::{format_book_details, format_book_list, format_price};
use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{parse_price, parse_year, BookId};
use crate::services::BookService;
use crate::storage::Storage;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add {
        /// Book title
        title: String,
        /// Author name
        author: String,
        /// Publication year
        year: String,
        /// Price (e.g., "29.90" or "29,90")
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// List all books
    List,
    /// Show a single book
    Show {
        /// Book ID
        id: BookId,
    },
    /// Search books by author (case-insensitive, partial match)
    Search {
        /// Part of the author's name
        author: String,
    },
    /// Change the price of a book
    UpdatePrice {
        /// Book ID
        id: BookId,
        /// New price
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// Remove a book
    Delete {
        /// Book ID
        id: BookId,
    },
}

/// Handle a book command
pub fn handle_book_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BookCommands,
) -> LivrariaResult<()> {
    let service = BookService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BookCommands::Add {
            title,
            author,
            year,
            price,
        } => {
            let year = parse_year(&year)?;
            let price = parse_price(&price)?;

            let book = service.create(&title, &author, year, price)?;
            println!("Added book: {}", book.title);
            println!("  ID: {}", book.id);
        }

        BookCommands::List => {
            print!("{}", format_book_list(&service.list()?, currency));
        }

        BookCommands::Show { id } => {
            let book = service
                .get(id)?
                .ok_or_else(|| LivrariaError::book_not_found(id.to_string()))?;
            print!("{}", format_book_details(&book, currency));
        }

        BookCommands::Search { author } => {
            let books = service.search_by_author(&author)?;
            if books.is_empty() {
                println!("No books found for author: {}", author);
            } else {
                println!("Books by author matching '{}':", author);
                println!();
                print!("{}", format_book_list(&books, currency));
            }
        }

        BookCommands::UpdatePrice { id, price } => {
            let price = parse_price(&price)?;
            if !service.update_price(id, price)? {
                return Err(LivrariaError::book_not_found(id.to_string()));
            }
            println!(
                "Price of book {} updated to {}",
                id,
                format_price(price, currency)
            );
        }

        BookCommands::Delete { id } => {
            if !service.delete(id)? {
                return Err(LivrariaError::book_not_found(id.to_string()));
            }
            println!("Removed book {}", id);
        }
    }

    Ok(())
}
