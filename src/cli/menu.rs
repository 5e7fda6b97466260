//! Interactive menu
//!
//! A numbered menu driven by line-based input. Invalid values re-prompt for
//! the same field; any other failure is reported and the menu carries on.
//! End of input ends the session.

use std::io::{BufRead, Write};

use crate::config::settings::Settings;
use crate::display::book::format_book_list;
use crate::display::summary::{format_import_result, format_prune_report};
use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{parse_price, parse_year, validate_year, BookId, BookValidationError};
use crate::services::BookService;
use crate::storage::Storage;

use super::backup::run_backup;
use super::exchange::{run_export, run_import};

const MENU: &str = "\n=== LIVRARIA: BOOKSTORE MANAGEMENT ===
1. Add a new book
2. List all books
3. Update a book's price
4. Remove a book
5. Search books by author
6. Export data to CSV
7. Import data from CSV
8. Back up the database
9. Exit
";

/// What the menu does after an action
enum Flow {
    Continue,
    /// Input ran out in the middle of an action
    Exit,
}

/// Interactive session over any input/output pair
pub struct MenuSession<'a, R, W> {
    storage: &'a Storage,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    /// Create a session reading from `input` and writing to `output`
    pub fn new(storage: &'a Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> LivrariaResult<()> {
        loop {
            write!(self.output, "{}", MENU)?;

            let choice = match self.prompt("Choose an option: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            let outcome = match choice.trim() {
                "1" => self.add_book(),
                "2" => self.list_books(),
                "3" => self.update_price(),
                "4" => self.remove_book(),
                "5" => self.search_by_author(),
                "6" => self.export_csv(),
                "7" => self.import_csv(),
                "8" => self.backup(),
                "9" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option! Try again.")?;
                    continue;
                }
            };

            for failure in self.storage.take_audit_failures() {
                writeln!(self.output, "Warning: audit log not updated: {}", failure)?;
            }

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }

            if self.prompt("Press Enter to continue...")?.is_none() {
                return Ok(());
            }
        }
    }

    fn add_book(&mut self) -> LivrariaResult<Flow> {
        let Some(title) = self.prompt_with("Title: ", |s| {
            required_text(s, BookValidationError::EmptyTitle)
        })?
        else {
            return Ok(Flow::Exit);
        };

        let Some(author) = self.prompt_with("Author: ", |s| {
            required_text(s, BookValidationError::EmptyAuthor)
        })?
        else {
            return Ok(Flow::Exit);
        };

        let Some(year) = self.prompt_with("Publication year: ", |s| {
            let year = parse_year(s)?;
            validate_year(year)?;
            Ok(year)
        })?
        else {
            return Ok(Flow::Exit);
        };

        let Some(price) = self.prompt_with("Price: ", parse_price)? else {
            return Ok(Flow::Exit);
        };

        let book = BookService::new(self.storage).create(&title, &author, year, price)?;
        writeln!(self.output, "Book added! (ID {})", book.id)?;
        Ok(Flow::Continue)
    }

    fn list_books(&mut self) -> LivrariaResult<Flow> {
        let books = BookService::new(self.storage).list()?;
        write!(
            self.output,
            "{}",
            format_book_list(&books, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn update_price(&mut self) -> LivrariaResult<Flow> {
        self.list_books()?;

        let Some(id) = self.prompt_with("ID of the book to update: ", parse_book_id)? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt_with("New price: ", parse_price)? else {
            return Ok(Flow::Exit);
        };

        if BookService::new(self.storage).update_price(id, price)? {
            writeln!(self.output, "Price updated!")?;
        } else {
            writeln!(self.output, "Book not found!")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_book(&mut self) -> LivrariaResult<Flow> {
        self.list_books()?;

        let Some(id) = self.prompt_with("ID of the book to remove: ", parse_book_id)? else {
            return Ok(Flow::Exit);
        };

        if BookService::new(self.storage).delete(id)? {
            writeln!(self.output, "Book removed!")?;
        } else {
            writeln!(self.output, "Book not found!")?;
        }
        Ok(Flow::Continue)
    }

    fn search_by_author(&mut self) -> LivrariaResult<Flow> {
        let Some(author) = self.prompt("Author name: ")? else {
            return Ok(Flow::Exit);
        };
        let author = author.trim().to_string();

        let books = BookService::new(self.storage).search_by_author(&author)?;
        if books.is_empty() {
            writeln!(self.output, "No books found for author: {}", author)?;
        } else {
            writeln!(self.output, "\n--- BOOKS BY AUTHOR: {} ---", author.to_uppercase())?;
            write!(
                self.output,
                "{}",
                format_book_list(&books, &self.settings.currency_symbol)
            )?;
        }
        Ok(Flow::Continue)
    }

    fn export_csv(&mut self) -> LivrariaResult<Flow> {
        let (destination, count) = run_export(self.storage, self.settings, None)?;
        if count == 0 {
            writeln!(self.output, "No books to export; wrote header only.")?;
        }
        writeln!(self.output, "Data exported to: {}", destination.display())?;
        Ok(Flow::Continue)
    }

    fn import_csv(&mut self) -> LivrariaResult<Flow> {
        let Some(file) = self.prompt("CSV file to import: ")? else {
            return Ok(Flow::Exit);
        };

        let result = run_import(self.storage, file.trim())?;
        write!(self.output, "{}", format_import_result(&result))?;
        Ok(Flow::Continue)
    }

    fn backup(&mut self) -> LivrariaResult<Flow> {
        let (backup, report) = run_backup(self.storage, self.settings)?;
        writeln!(self.output, "Backup created: {}", backup.filename)?;
        write!(self.output, "{}", format_prune_report(&report))?;
        Ok(Flow::Continue)
    }

    /// Read one line, `None` at end of input
    fn prompt(&mut self, label: &str) -> LivrariaResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Prompt until `parse` accepts the answer
    fn prompt_with<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> LivrariaResult<T>,
    ) -> LivrariaResult<Option<T>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };

            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) if e.is_recoverable() => writeln!(self.output, "{}", e)?,
                Err(e) => return Err(e),
            }
        }
    }
}

fn required_text(s: &str, missing: BookValidationError) -> LivrariaResult<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(missing.into());
    }
    Ok(s.to_string())
}

fn parse_book_id(s: &str) -> LivrariaResult<BookId> {
    s.parse()
        .map_err(|_| LivrariaError::Validation(format!("Invalid book ID: '{}'", s.trim())))
}
