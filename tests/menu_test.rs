//! Tests for the interactive menu

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use course_catalog::application::services::CatalogService;
use course_catalog::cli::menu::{INVALID_INPUT, NOT_FOUND};
use course_catalog::cli::{Menu, MenuCommand};
use course_catalog::domain::CourseTree;
use course_catalog::infrastructure::traits::RealFileSystem;
use course_catalog::util::testing;

fn catalog_file(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("courses.csv");
    std::fs::write(
        &path,
        "CSCI200,Data Structures,CSCI100\nCSCI100,Intro\nCSCI300,Algorithms,CSCI999\n",
    )
    .unwrap();
    path
}

/// Run a scripted session and return everything written.
fn run_session(tree: &mut CourseTree, file: PathBuf, input: &str) -> String {
    testing::init_test_setup();
    let service = CatalogService::new(Arc::new(RealFileSystem), ',');
    let mut menu = Menu::new(tree, &service, file);
    let mut out = Vec::new();
    menu.run(Cursor::new(input), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ============================================================
// Parsing
// ============================================================

#[rstest]
#[case("1", Some(MenuCommand::Load))]
#[case("2", Some(MenuCommand::List))]
#[case("9", Some(MenuCommand::Exit))]
#[case("3 CSCI100", Some(MenuCommand::Show { id: "CSCI100".to_string() }))]
#[case("  3   CSCI100  extra", Some(MenuCommand::Show { id: "CSCI100".to_string() }))]
#[case("3", None)]
#[case("1 2", None)]
#[case("", None)]
#[case("4", None)]
#[case("load", None)]
fn given_input_when_parsing_then_maps_to_command(
    #[case] input: &str,
    #[case] expected: Option<MenuCommand>,
) {
    assert_eq!(MenuCommand::parse(input), expected);
}

// ============================================================
// Session
// ============================================================

#[test]
fn given_load_then_show_when_running_then_prints_count_and_details() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "1\n3 CSCI200\n9\n");

    assert!(out.contains("Loaded 2 courses\n"));
    assert!(out.contains("CSCI200 Data Structures\n\t1 prerequisite:\n\t\tCSCI100\n"));
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_list_when_running_then_prints_courses_ascending() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "1\n2\n9\n");

    let first = out.find("CSCI100 Intro").unwrap();
    let second = out.find("CSCI200 Data Structures").unwrap();
    assert!(first < second);
    assert!(!out.contains("CSCI300 Algorithms"));
}

#[test]
fn given_unknown_course_when_showing_then_prints_not_found() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "1\n3 CSCI300\n9\n");

    assert!(out.contains(NOT_FOUND));
}

#[test]
fn given_invalid_input_when_running_then_prints_hint_and_continues() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "hello\n1\n9\n");

    assert!(out.contains(INVALID_INPUT));
    assert!(out.contains("Loaded 2 courses"));
}

#[test]
fn given_exit_when_running_then_ignores_remaining_input() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "9\n1\n");

    assert!(!out.contains("Loaded"));
    assert!(tree.is_empty());
}

#[test]
fn given_end_of_input_without_exit_when_running_then_returns_cleanly() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, catalog_file(&temp), "1\n");

    assert!(out.contains("Loaded 2 courses"));
}

#[test]
fn given_missing_catalog_file_when_loading_then_reports_error_and_keeps_running() {
    let temp = TempDir::new().unwrap();
    let mut tree = CourseTree::new();

    let out = run_session(&mut tree, temp.path().join("nope.csv"), "1\n2\n9\n");

    assert!(out.contains("Cannot load catalog"));
    assert!(tree.is_empty());
}

#[test]
fn given_menu_when_printed_then_lists_all_options() {
    let mut out = Vec::new();

    Menu::print_menu(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("1: Loads course data from a CSV file\n"));
    assert!(text.contains("3 + Course ID: Prints an individual course"));
    assert!(text.ends_with("9: Close the program\n"));
}
