//! Command dispatch: one handler per subcommand

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::LoadReport;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::menu::{Menu, NOT_FOUND};
use crate::cli::{output, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CourseTree, TreeNodeConvert};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(file) = &cli.file {
        settings.catalog_file = file.clone();
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::List) => cmd_list(&container),
        Some(Commands::Show { id }) => cmd_show(&container, id),
        Some(Commands::Tree) => cmd_tree(&container),
        Some(Commands::Stats) => cmd_stats(&container),
        Some(Commands::Menu) | None => cmd_menu(&container),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// Build a fresh catalog from the configured file.
fn load_catalog(container: &ServiceContainer) -> CliResult<(CourseTree, LoadReport)> {
    let mut tree = CourseTree::new();
    let report = container
        .catalog_service()
        .load_file(&mut tree, &container.settings.catalog_file)?;
    if report.skipped > 0 {
        output::warning(&format!("skipped {} malformed line(s)", report.skipped));
    }
    Ok((tree, report))
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer) -> CliResult<()> {
    let (tree, _) = load_catalog(container)?;
    tree.traverse_ascending(|course| output::info(course));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let (tree, _) = load_catalog(container)?;
    write_details(&tree, id, &mut io::stdout().lock())
}

/// Write the detail text for `id`, or the menu's not-found line.
fn write_details<W: Write>(tree: &CourseTree, id: &str, out: &mut W) -> CliResult<()> {
    match tree.find_details(id) {
        Ok(details) => {
            write!(out, "{}", details)?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "{}", NOT_FOUND)?;
            Err(e.into())
        }
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let (tree, _) = load_catalog(container)?;
    print!("{}", tree.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer) -> CliResult<()> {
    let (tree, report) = load_catalog(container)?;
    output::header(&container.settings.catalog_file.display());
    output::info(&format!("lines:    {}", report.lines));
    output::info(&format!("inserted: {}", report.inserted));
    output::info(&format!("skipped:  {}", report.skipped));
    output::info(&format!("courses:  {}", tree.len()));
    output::info(&format!("height:   {}", tree.height()));
    if report.evicted.is_empty() {
        output::success("all prerequisites resolved");
    } else {
        output::info(&format!("evicted:  {}", report.evicted.len()));
        for eviction in &report.evicted {
            output::failure(&format!(
                "{} (missing {})",
                eviction.course.id(),
                eviction.missing
            ));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_menu(container: &ServiceContainer) -> CliResult<()> {
    let mut tree = CourseTree::new();
    let service = container.catalog_service();
    let mut menu = Menu::new(
        &mut tree,
        &service,
        container.settings.catalog_file.clone(),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    menu.run(stdin.lock(), &mut stdout)?;
    debug!(courses = tree.len(), "menu closed");
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => print_config_path("global", &path),
                None => output::warning("no global config directory available"),
            }
            let cwd = std::env::current_dir()?;
            print_config_path("local", &local_config_path(&cwd));
        }
        ConfigCommands::Template => {
            print!("{}", Settings::template());
        }
    }
    Ok(())
}

fn print_config_path(label: &str, path: &std::path::Path) {
    let state = if path.exists() { "exists" } else { "not found" };
    output::info(&format!("{}: {} ({})", label, path.display(), state));
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::cli::CliError;
    use crate::domain::{Course, DomainError};
    use crate::exitcode;

    fn catalog() -> CourseTree {
        let mut tree = CourseTree::new();
        tree.insert(Course::new("CSCI100", "Intro", vec![]));
        tree
    }

    #[test]
    fn given_present_id_when_showing_then_writes_details() {
        let mut out = Vec::new();

        write_details(&catalog(), "CSCI100", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "CSCI100 Intro\n\t no prerequisites\n");
    }

    #[test]
    fn given_missing_id_when_showing_then_prints_not_found_and_exits_with_dataerr() {
        let mut out = Vec::new();

        let err = write_details(&catalog(), "CSCI999", &mut out).unwrap_err();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{NOT_FOUND}\n"));
        assert!(matches!(
            &err,
            CliError::Application(ApplicationError::Domain(DomainError::CourseNotFound(id)))
                if id == "CSCI999"
        ));
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }
}
