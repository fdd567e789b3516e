//! Domain entities: course records

use std::fmt;

use crate::domain::{DomainError, DomainResult};

/// A single catalog entry.
///
/// Fields are fixed at construction; the catalog orders records by `id` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: String,
    name: String,
    prerequisites: Vec<String>,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prerequisites,
        }
    }

    /// Parse one delimited catalog line.
    ///
    /// Layout: `id<d>name<d>prereq<d>prereq...`
    ///
    /// - Lines with fewer than two fields, or an empty id, are rejected.
    /// - Empty prerequisite fields (e.g. a trailing delimiter) are skipped.
    /// - Fields are taken verbatim; only the line ending is stripped.
    pub fn parse_line(line: &str, delimiter: char) -> DomainResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.split(delimiter);

        let (id, name) = match (fields.next(), fields.next()) {
            (Some(id), Some(name)) => (id, name),
            _ => {
                return Err(DomainError::MalformedLine {
                    line: line.to_string(),
                    reason: "expected at least an id and a name".to_string(),
                })
            }
        };
        if id.is_empty() {
            return Err(DomainError::MalformedLine {
                line: line.to_string(),
                reason: "empty course id".to_string(),
            });
        }

        let prerequisites = fields
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self::new(id, name, prerequisites))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

/// Multi-line detail view used by lookups and listings.
///
/// ```text
/// CSCI300 Introduction to Algorithms
///     2 prerequisites:
///         CSCI200
///         MATH201
/// ```
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)?;

        if self.prerequisites.is_empty() {
            return writeln!(f, "\n\t no prerequisites");
        }

        let count = self.prerequisites.len();
        let noun = if count > 1 {
            "prerequisites"
        } else {
            "prerequisite"
        };
        write!(f, "\n\t{} {}:", count, noun)?;
        for prerequisite in &self.prerequisites {
            write!(f, "\n\t\t{}", prerequisite)?;
        }
        writeln!(f)
    }
}
