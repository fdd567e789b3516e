//! Tests for Course parsing and display

use rstest::rstest;

use course_catalog::domain::{Course, DomainError};

// ============================================================
// Parsing
// ============================================================

#[test]
fn given_line_with_prerequisites_when_parsing_then_keeps_declared_order() {
    let course = Course::parse_line("CSCI300,Introduction to Algorithms,CSCI200,MATH201", ',')
        .unwrap();

    assert_eq!(course.id(), "CSCI300");
    assert_eq!(course.name(), "Introduction to Algorithms");
    assert_eq!(
        course.prerequisites(),
        ["CSCI200".to_string(), "MATH201".to_string()]
    );
}

#[test]
fn given_trailing_delimiter_when_parsing_then_skips_empty_prerequisite() {
    let course = Course::parse_line("CSCI100,Intro,", ',').unwrap();

    assert!(course.prerequisites().is_empty());
    assert!(!course.has_prerequisites());
}

#[test]
fn given_empty_fields_between_prerequisites_when_parsing_then_skips_them() {
    let course = Course::parse_line("CSCI400,Large Software,,CSCI301,,CSCI350", ',').unwrap();

    assert_eq!(
        course.prerequisites(),
        ["CSCI301".to_string(), "CSCI350".to_string()]
    );
}

#[rstest]
#[case("CSCI100")]
#[case("")]
#[case(",Intro")]
fn given_malformed_line_when_parsing_then_returns_malformed_line(#[case] line: &str) {
    let result = Course::parse_line(line, ',');

    assert!(
        matches!(result, Err(DomainError::MalformedLine { .. })),
        "expected MalformedLine for {:?}, got {:?}",
        line,
        result
    );
}

#[test]
fn given_two_fields_with_empty_name_when_parsing_then_accepts_line() {
    let course = Course::parse_line("CSCI100,", ',').unwrap();

    assert_eq!(course.id(), "CSCI100");
    assert_eq!(course.name(), "");
}

// ============================================================
// Display
// ============================================================

#[test]
fn given_no_prerequisites_when_displaying_then_shows_notice() {
    let course = Course::new("CSCI100", "Introduction to Computer Science", vec![]);

    assert_eq!(
        course.to_string(),
        "CSCI100 Introduction to Computer Science\n\t no prerequisites\n"
    );
}

#[test]
fn given_one_prerequisite_when_displaying_then_uses_singular() {
    let course = Course::new("CSCI200", "Data Structures", vec!["CSCI101".into()]);

    assert_eq!(
        course.to_string(),
        "CSCI200 Data Structures\n\t1 prerequisite:\n\t\tCSCI101\n"
    );
}

#[test]
fn given_several_prerequisites_when_displaying_then_uses_plural_and_lists_each() {
    let course = Course::new(
        "CSCI300",
        "Introduction to Algorithms",
        vec!["CSCI200".into(), "MATH201".into()],
    );

    assert_eq!(
        course.to_string(),
        "CSCI300 Introduction to Algorithms\n\t2 prerequisites:\n\t\tCSCI200\n\t\tMATH201\n"
    );
}
