//! Course catalog: an arena-backed binary search tree of course records with
//! a one-shot prerequisite validation pass.
//!
//! Layers, innermost first:
//! - [`domain`]: `Course`, `CourseTree` and their errors (no I/O)
//! - [`application`]: loading and validation services
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: clap commands and the interactive menu

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
