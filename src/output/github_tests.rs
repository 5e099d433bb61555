use std::path::Path;

use super::*;
use crate::rules::{
    GetNodeInProcessRule, HardcodedPasswordRule, MissingFunctionDocstringRule, Rule,
};

fn violation(rule: &dyn Rule, path: &str, line: usize, message: &str) -> Violation {
    Violation::new(rule, Path::new(path), line, message.to_string())
}

#[test]
fn empty_report_says_no_issues() {
    assert_eq!(GithubFormatter.format(&[]).unwrap(), "✓ No issues found!\n");
}

#[test]
fn annotation_per_violation_in_input_order() {
    let violations = vec![
        violation(&GetNodeInProcessRule::new(), "player.gd", 12, "Cache it"),
        violation(&HardcodedPasswordRule::new(), "db.gd", 3, "Hardcoded"),
        violation(&MissingFunctionDocstringRule::new(), "db.gd", 1, "Docs"),
    ];

    let output = GithubFormatter.format(&violations).unwrap();
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(
        lines[0],
        "::warning file=player.gd,line=12,title=[P004] Get Node in Process::Cache it"
    );
    assert_eq!(
        lines[1],
        "::error file=db.gd,line=3,title=[S001] Hardcoded Password::Hardcoded"
    );
    assert!(lines[2].starts_with("::notice file=db.gd,line=1,title=[R003] "));
}

#[test]
fn summary_block_follows_annotations() {
    let violations = vec![violation(&HardcodedPasswordRule::new(), "db.gd", 3, "m")];

    let output = GithubFormatter.format(&violations).unwrap();

    assert!(output.contains("\n\n📊 Analysis Summary:\n"));
    assert!(output.contains("- Total issues: 1\n"));
    assert!(output.contains("- Errors: 1\n- Warnings: 0\n- Info: 0\n"));
}

#[test]
fn special_characters_are_escaped() {
    let violations = vec![violation(
        &HardcodedPasswordRule::new(),
        "a,b:c.gd",
        1,
        "50% done\nnext",
    )];

    let output = GithubFormatter.format(&violations).unwrap();

    assert!(output.starts_with("::error file=a%2Cb%3Ac.gd,line=1,"));
    assert!(output.contains("::50%25 done%0Anext\n"));
}
