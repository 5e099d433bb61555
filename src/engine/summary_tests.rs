use std::path::Path;

use super::*;
use crate::rules::{
    HardcodedPasswordRule, InconsistentIndentationRule, MissingFunctionDocstringRule,
};

#[test]
fn empty_input_gives_empty_summary() {
    let summary = summarize(&[]);

    assert_eq!(summary.total, 0);
    assert!(summary.by_severity.is_empty());
    assert!(summary.by_category.is_empty());
    assert!(summary.by_file.is_empty());
    assert_eq!(summary.severity_count("error"), 0);
}

#[test]
fn tallies_each_dimension_independently() {
    let a = Path::new("a.gd");
    let b = Path::new("b.gd");
    let violations = vec![
        Violation::new(&MissingFunctionDocstringRule::new(), a, 1, "m".to_string()),
        Violation::new(&HardcodedPasswordRule::new(), a, 2, "m".to_string()),
        Violation::new(&InconsistentIndentationRule, b, 3, "m".to_string()),
        Violation::new(&HardcodedPasswordRule::new(), b, 4, "m".to_string()),
    ];

    let summary = summarize(&violations);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.severity_count("error"), 3);
    assert_eq!(summary.severity_count("info"), 1);
    assert_eq!(summary.by_category["readability"], 2);
    assert_eq!(summary.by_category["security"], 2);
    assert_eq!(summary.by_file["a.gd"], 2);
    assert_eq!(summary.by_file["b.gd"], 2);

    for counts in [&summary.by_severity, &summary.by_category, &summary.by_file] {
        assert_eq!(counts.values().sum::<usize>(), summary.total);
    }
}

#[test]
fn keys_keep_first_occurrence_order() {
    let path = Path::new("x.gd");
    let violations = vec![
        Violation::new(&MissingFunctionDocstringRule::new(), path, 1, "m".to_string()),
        Violation::new(&HardcodedPasswordRule::new(), path, 2, "m".to_string()),
    ];

    let summary = summarize(&violations);
    let severities: Vec<_> = summary.by_severity.keys().cloned().collect();

    assert_eq!(severities, vec!["info".to_string(), "error".to_string()]);
}

#[test]
fn serializes_as_plain_maps() {
    let violations = vec![Violation::new(
        &HardcodedPasswordRule::new(),
        Path::new("s.gd"),
        1,
        "m".to_string(),
    )];

    let value = serde_json::to_value(summarize(&violations)).unwrap();

    assert_eq!(value["total"], 1);
    assert_eq!(value["by_severity"]["error"], 1);
    assert_eq!(value["by_category"]["security"], 1);
    assert_eq!(value["by_file"]["s.gd"], 1);
}
