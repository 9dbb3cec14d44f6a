// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::inspections::offsets::MESSAGE_USE_SQUARE_BRACKETS;
use crate::problems::{Severity, TextEdit};
use crate::tests::{analyze_yaml, analyze_yaml_with};
use crate::InspectionOptions;

use anyhow::Result;

#[test]
fn array_with_string_index() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [array] }
          index: { var: $k, types: [string] }
"#,
    )?;
    assert!(problems.is_empty(), "{problems:?}");
    Ok(())
}

#[test]
fn array_with_boolean_index() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [array] }
          index: { var: $k, types: [bool] }
"#,
    )?;
    assert_eq!(problems.len(), 1);

    let problem = &problems[0];
    assert_eq!(
        problem.message,
        "Resolved index type ([boolean]) is incompatible with possible [string, integer]. Probably just proper type hinting needed."
    );
    assert_eq!(problem.severity, Severity::Warning);
    assert_eq!(problem.anchor, "$k");
    assert_eq!((problem.line, problem.col), (1, 4));
    assert_eq!((problem.end_line, problem.end_col), (1, 6));
    assert!(problem.fix.is_none());
    Ok(())
}

#[test]
fn integer_container() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - assign:
          target: { var: $y }
          value: { literal: "1" }
      - access:
          container: { var: $count, types: [int] }
          index: { literal: "0", types: [int] }
"#,
    )?;
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "'$count' may not support offset operations (or its type not annotated properly: [integer])."
    );
    assert_eq!(problems[0].anchor, "$count[0]");
    assert_eq!((problems[0].line, problems[0].col), (2, 1));
    let expected = format!(
        "a.php:2:1: warning: {} [OffsetOperationsInspection]",
        problems[0].message
    );
    assert_eq!(problems[0].to_string(), expected);
    Ok(())
}

#[test]
fn curly_access_is_only_a_style_problem() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [integer] }
          index: { literal: "0", types: [boolean] }
          bracket: curly
"#,
    )?;
    assert_eq!(problems.len(), 1);

    let problem = &problems[0];
    assert_eq!(problem.message, MESSAGE_USE_SQUARE_BRACKETS);
    assert_eq!(problem.severity, Severity::WeakWarning);
    assert_eq!(problem.anchor, "$x{0}");

    let fix = problem.fix.as_ref().expect("fix offered");
    assert_eq!(
        fix.edits,
        vec![
            TextEdit {
                start: 2,
                end: 3,
                replacement: "[".to_string(),
            },
            TextEdit {
                start: 4,
                end: 5,
                replacement: "]".to_string(),
            },
        ]
    );
    Ok(())
}

#[test]
fn curly_access_without_promotion_is_type_checked() -> Result<()> {
    let options = InspectionOptions {
        promote_square_brackets: false,
        ..InspectionOptions::default()
    };
    let problems = analyze_yaml_with(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [integer] }
          index: { literal: "0" }
          bracket: curly
"#,
        options,
    )?;
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].severity, Severity::Warning);
    assert!(problems[0].message.starts_with("'$x' may not support"));
    Ok(())
}

const SETTINGS: &str = r#"
classes:
  - name: \App\Settings
    implements: [\ArrayAccess]
    methods:
      - name: offsetSet
        parameters: [{ name: key, types: [string] }, { name: value }]
      - name: offsetGet
        parameters: [{ name: key, types: [string] }]
files:
  - path: a.php
    statements:
      - access:
          container: { var: $settings, types: [\App\Settings] }
          index: { literal: "42", types: [integer] }
      - access:
          container: { var: $settings, types: [\App\Settings] }
          index: { literal: "'name'", types: [string] }
"#;

#[test]
fn offset_methods_define_index_types() -> Result<()> {
    let problems = analyze_yaml(SETTINGS)?;
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "Resolved index type ([integer]) is incompatible with possible [string]. Probably just proper type hinting needed."
    );
    assert_eq!(problems[0].anchor, "42");
    Ok(())
}

#[test]
fn index_checks_can_be_disabled() -> Result<()> {
    let options = InspectionOptions {
        check_index_types: false,
        ..InspectionOptions::default()
    };
    assert!(analyze_yaml_with(SETTINGS, options)?.is_empty());
    Ok(())
}

#[test]
fn inspection_can_be_disabled() -> Result<()> {
    let options = InspectionOptions {
        disabled: vec!["OffsetOperationsInspection".to_string()],
        ..InspectionOptions::default()
    };
    assert!(analyze_yaml_with(SETTINGS, options)?.is_empty());
    Ok(())
}

#[test]
fn incomplete_accesses_are_skipped() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          index: { literal: "0", types: [integer] }
      - access:
          container: { var: $x, types: [integer] }
          index: { literal: "0", types: [integer] }
          unterminated: true
"#,
    )?;
    assert!(problems.is_empty(), "{problems:?}");
    Ok(())
}

#[test]
fn unknown_and_untyped_values_are_skipped() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $a, types: [integer], unknown: true }
          index: { literal: "0", types: [integer] }
      - access:
          container: { var: $b }
          index: { literal: "0", types: [integer] }
      - access:
          container: { var: $c, types: [array] }
          index: { var: $k }
      - access:
          container: { var: $d, types: [array] }
          index: { var: $k, types: [mixed, 'null'] }
"#,
    )?;
    assert!(problems.is_empty(), "{problems:?}");
    Ok(())
}

#[test]
fn partially_unknown_index_is_still_checked() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [array] }
          index: { var: $k, types: [float], unknown: true }
"#,
    )?;
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].anchor, "$k");
    Ok(())
}

#[test]
fn push_assignment() -> Result<()> {
    let yaml = r#"
files:
  - path: a.php
    statements:
      - assign:
          target:
            access:
              container: { var: $total, types: [array], inferred: [float] }
          value: { literal: "1.5", types: [float] }
"#;
    let problems = analyze_yaml(yaml)?;
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "'$total' may not support offset operations (or its type not annotated properly: [float])."
    );
    assert_eq!(problems[0].anchor, "$total[]");

    let options = InspectionOptions {
        analyze_array_push: false,
        ..InspectionOptions::default()
    };
    assert!(analyze_yaml_with(yaml, options)?.is_empty());
    Ok(())
}

#[test]
fn nested_accesses_are_visited() -> Result<()> {
    let problems = analyze_yaml(
        r#"
files:
  - path: a.php
    statements:
      - call:
          callee: count
          args:
            - access:
                container: { var: $rows, types: [array] }
                index:
                  access:
                    container: { var: $ids, types: [array] }
                    index: { literal: "true", types: [boolean] }
                  types: [boolean]
"#,
    )?;
    let anchors: Vec<&str> = problems.iter().map(|p| p.anchor.as_str()).collect();
    assert_eq!(anchors, vec!["$ids[true]", "true"]);
    Ok(())
}
