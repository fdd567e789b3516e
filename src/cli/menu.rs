//! Interactive menu loop
//!
//! Reads one command per line and answers on the given writer until the
//! user exits or input ends.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::cli::CliResult;
use crate::domain::{CourseTree, DomainError};

pub const INVALID_INPUT: &str =
    "invalid input.  Please enter a valid input key, e.g. \"1\", \"3 CSCI100\"";

pub const NOT_FOUND: &str = "Course not found";

/// A parsed menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Load the catalog file and validate it
    Load,
    /// Print every course in ascending order
    List,
    /// Print one course's details
    Show { id: String },
    /// Leave the menu
    Exit,
}

impl MenuCommand {
    /// Input key and description, in display order.
    pub const OPTIONS: [(&'static str, &'static str); 4] = [
        ("1", "Loads course data from a CSV file"),
        (
            "2",
            "Prints an alphanumeric list of all courses in the Computer Science Department",
        ),
        ("3 + Course ID", "Prints an individual course and it's prerequisites"),
        ("9", "Close the program"),
    ];

    /// `"3 <id>"` needs at least two words; extra words are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = input.split_whitespace();
        match (words.next()?, words.next()) {
            ("1", None) => Some(MenuCommand::Load),
            ("2", None) => Some(MenuCommand::List),
            ("3", Some(id)) => Some(MenuCommand::Show { id: id.to_string() }),
            ("9", None) => Some(MenuCommand::Exit),
            _ => None,
        }
    }
}

/// Menu session bound to one catalog.
pub struct Menu<'a> {
    tree: &'a mut CourseTree,
    service: &'a CatalogService,
    catalog_file: PathBuf,
}

impl<'a> Menu<'a> {
    pub fn new(tree: &'a mut CourseTree, service: &'a CatalogService, catalog_file: PathBuf) -> Self {
        Self {
            tree,
            service,
            catalog_file,
        }
    }

    pub fn print_menu<W: Write>(out: &mut W) -> CliResult<()> {
        for (key, description) in MenuCommand::OPTIONS {
            writeln!(out, "{}: {}", key, description)?;
        }
        Ok(())
    }

    /// Run until `Exit` or end of input.
    #[instrument(level = "debug", skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<()> {
        Self::print_menu(out)?;
        for line in input.lines() {
            let line = line?;
            debug!(input = line.as_str(), "menu input");
            match MenuCommand::parse(&line) {
                Some(MenuCommand::Exit) => return Ok(()),
                Some(command) => self.dispatch(command, out)?,
                None => writeln!(out, "{}", INVALID_INPUT)?,
            }
            Self::print_menu(out)?;
        }
        Ok(())
    }

    /// Execute a single non-exit command.
    pub fn dispatch<W: Write>(&mut self, command: MenuCommand, out: &mut W) -> CliResult<()> {
        match command {
            MenuCommand::Load => {
                match self.service.load_file(self.tree, &self.catalog_file) {
                    Ok(report) => writeln!(out, "Loaded {} courses", report.size)?,
                    Err(e) => writeln!(out, "Cannot load catalog: {}", e)?,
                }
            }
            MenuCommand::List => {
                for (_, course) in self.tree.iter() {
                    writeln!(out, "{}", course)?;
                }
            }
            MenuCommand::Show { id } => match self.tree.find_details(&id) {
                Ok(details) => write!(out, "{}", details)?,
                Err(DomainError::CourseNotFound(_)) => writeln!(out, "{}", NOT_FOUND)?,
                Err(e) => return Err(e.into()),
            },
            MenuCommand::Exit => {}
        }
        Ok(())
    }
}
