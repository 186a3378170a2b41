//! Interactive text menu for the lending desk.
//!
//! [`Session`] reads one action at a time from any `BufRead`, gathers the
//! arguments it needs, calls the matching [`BookRegistry`] operation and
//! writes the outcome. It ends on the exit choice or at end of input.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use colored::Colorize;
use thiserror::Error;

use crate::{
    listing::ListingView,
    record::BookId,
    registry::{BookRegistry, RegistryError},
};

/// Errors that end a session early
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The JSON listing could not be produced
    #[error("could not render listing: {0}")]
    Render(#[from] serde_json::Error),
}

/// Top-level menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Add a Book
    Add,
    /// 2. Delete a Book
    Delete,
    /// 3. Issue a Book
    Issue,
    /// 4. Return a Book
    Return,
    /// 5. Display All Books
    Display,
    /// 6. Update Book Details
    Update,
    /// 7. Exit
    Exit,
}

/// Input that does not name a menu entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice! Please try again.")]
pub struct InvalidMenuChoice;

impl FromStr for MenuChoice {
    type Err = InvalidMenuChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(1) => Ok(Self::Add),
            Ok(2) => Ok(Self::Delete),
            Ok(3) => Ok(Self::Issue),
            Ok(4) => Ok(Self::Return),
            Ok(5) => Ok(Self::Display),
            Ok(6) => Ok(Self::Update),
            Ok(7) => Ok(Self::Exit),
            _ => Err(InvalidMenuChoice),
        }
    }
}

/// Main menu text
const MAIN_MENU: &str = "\
1. Add a Book
2. Delete a Book
3. Issue a Book
4. Return a Book
5. Display All Books
6. Update Book Details
7. Exit";

/// Field selection menu for updates
const UPDATE_MENU: &str = "\
What do you want to update?
1. Title
2. Author
3. Both Title and Author";

/// One interactive run over a registry
#[derive(Debug)]
pub struct Session<R, W> {
    /// Catalog being operated on
    registry: BookRegistry,
    /// User input
    input: R,
    /// Display surface
    output: W,
    /// Render listings as JSON instead of text
    json_listing: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over `registry`
    #[must_use]
    pub fn new(registry: BookRegistry, input: R, output: W) -> Self {
        Self { registry, input, output, json_listing: false }
    }

    /// Render "Display All Books" as JSON
    #[must_use]
    pub fn with_json_listing(mut self, json_listing: bool) -> Self {
        self.json_listing = json_listing;
        self
    }

    /// The registry as the session left it
    #[must_use]
    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    /// Give back the registry and the output
    #[must_use]
    pub fn into_parts(self) -> (BookRegistry, W) {
        (self.registry, self.output)
    }

    /// Run until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the terminal cannot be read or written, or a
    /// JSON listing cannot be rendered.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(SessionError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Show the menu and perform one action; `false` means stop
    fn step(&mut self) -> Result<bool, SessionError> {
        writeln!(self.output, "\n{}", "===== Library Management System =====".bold())?;
        writeln!(self.output, "{MAIN_MENU}")?;
        let line = self.prompt("Enter your choice: ")?;

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                writeln!(self.output, "{}", e.to_string().red())?;
                return Ok(true);
            }
        };
        tracing::debug!(?choice, "menu selection");

        match choice {
            MenuChoice::Add => self.add()?,
            MenuChoice::Delete => self.delete()?,
            MenuChoice::Issue => self.issue()?,
            MenuChoice::Return => self.return_book()?,
            MenuChoice::Display => self.display()?,
            MenuChoice::Update => self.update()?,
            MenuChoice::Exit => {
                writeln!(self.output, "{}", "Exiting the system. Thank you!".green().bold())?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Add flow
    fn add(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_id("Enter Book ID: ")? else {
            return Ok(());
        };
        let title = self.prompt("Enter Book Title: ")?;
        let author = self.prompt("Enter Book Author: ")?;

        self.registry.add_book(id, &title, &author);
        let message = format!("Book '{title}' (ID: {id}) added successfully!");
        writeln!(self.output, "{}", message.green())?;
        Ok(())
    }

    /// Delete flow
    fn delete(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_id("Enter Book ID to delete: ")? else {
            return Ok(());
        };
        match self.registry.delete_book(id) {
            Ok(_) => {
                let message = format!("Book with ID {id} deleted successfully!");
                writeln!(self.output, "{}", message.green())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Issue flow
    fn issue(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_id("Enter Book ID: ")? else {
            return Ok(());
        };
        let borrower = self.prompt("Enter Student Name: ")?;
        match self.registry.issue_book(id, &borrower) {
            Ok(receipt) => writeln!(self.output, "{}", receipt.to_string().green())?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Return flow
    fn return_book(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_id("Enter Book ID: ")? else {
            return Ok(());
        };
        match self.registry.return_book(id) {
            Ok(receipt) if receipt.is_late() => {
                writeln!(self.output, "{}", receipt.to_string().yellow())?;
            }
            Ok(receipt) => writeln!(self.output, "{}", receipt.to_string().green())?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Display flow
    fn display(&mut self) -> Result<(), SessionError> {
        let listing = self.registry.list_books();
        let rendered = if self.json_listing {
            ListingView::render_json(&listing)?
        } else {
            ListingView::render_text(&listing)
        };
        writeln!(self.output, "{rendered}")?;
        Ok(())
    }

    /// Update flow: show current details, pick fields, read new values
    fn update(&mut self) -> Result<(), SessionError> {
        let Some(id) = self.prompt_id("Enter Book ID to update: ")? else {
            return Ok(());
        };
        let Some(book) = self.registry.find_book(id) else {
            return self.report(&RegistryError::NotFound(id));
        };
        let current = format!("Title: {}, Author: {}", book.title, book.author);
        let status = book.status.description();

        writeln!(self.output, "Current Details of Book ID {id}:")?;
        writeln!(self.output, "{current}")?;
        writeln!(self.output, "{status}")?;
        writeln!(self.output, "\n{UPDATE_MENU}")?;
        let choice = self.prompt("Enter your choice: ")?.trim().parse::<u32>().unwrap_or(0);

        let title = match choice {
            1 | 3 => Some(self.prompt("Enter new Title: ")?),
            _ => None,
        };
        let author = match choice {
            2 | 3 => Some(self.prompt("Enter new Author: ")?),
            _ => None,
        };

        match self.registry.update_book_by_choice(id, choice, title, author) {
            Ok(receipt) => writeln!(self.output, "{}", receipt.to_string().green())?,
            Err(e @ RegistryError::InvalidSelection(_)) => {
                tracing::debug!(%id, error = %e, "update rejected");
                writeln!(self.output, "{}", "Invalid choice! No updates made.".red())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Print a registry failure
    fn report(&mut self, error: &RegistryError) -> Result<(), SessionError> {
        tracing::debug!(%error, "operation failed");
        writeln!(self.output, "{}", error.to_string().red())?;
        Ok(())
    }

    /// Ask for a line of text; end of input is reported as `UnexpectedEof`
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    fn prompt(&mut self, text: &str) -> Result<String, SessionError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask for a book id; prints a message and yields `None` if it is not a number
    fn prompt_id(&mut self, text: &str) -> Result<Option<BookId>, SessionError> {
        let line = self.prompt(text)?;
        match line.parse::<BookId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                let message = format!("'{}' is not a valid book ID!", line.trim());
                writeln!(self.output, "{}", message.red())?;
                Ok(None)
            }
        }
    }
}
