//! Domain layer: course records and the catalog tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod tree_view;

pub use arena::{CourseHandle, CourseNode, CourseTree, InOrderIterator};
pub use entities::Course;
pub use error::{DomainError, DomainResult};
pub use tree_view::TreeNodeConvert;
