// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::OffsetAccessSite;
use crate::directory::{ClassIndex, ClassKind, ClassLike, MethodDecl, ParameterDecl};
use crate::inspections::offsets::{normalize_container_types, CapabilityResolver, ContainerVerdict};
use crate::oracle::TypeTable;
use crate::project::Project;
use crate::types::{BuiltinType::*, TypeName, TypeSet};

use anyhow::Result;

fn keyed(name: &str, key: Option<TypeSet>) -> MethodDecl {
    MethodDecl::new(
        name,
        vec![
            ParameterDecl::new("key", key),
            ParameterDecl::new("value", None),
        ],
    )
}

fn class(name: &str) -> ClassLike {
    ClassLike::new(name, ClassKind::Class)
}

fn directory() -> ClassIndex {
    let settings = class("\\App\\Settings")
        .implementing("\\ArrayAccess")
        .with_method(keyed("offsetSet", Some(TypeSet::of([String]))))
        .with_method(keyed("offsetGet", Some(TypeSet::of([String]))))
        .with_method(keyed("__get", None));
    let untyped_get = keyed("offsetGet", None);
    ClassIndex::from_classes([
        settings,
        class("\\App\\Untyped").with_method(untyped_get),
        class("\\App\\Magic").with_method(keyed("__set", None)),
        class("\\App\\Child").extending("\\App\\Settings"),
        class("\\App\\Plain"),
    ])
}

fn resolve_set(types: TypeSet) -> ContainerVerdict {
    let table = TypeTable::new();
    let directory = directory();
    let resolver = CapabilityResolver::new(&table, &directory);
    resolver.resolve_types(types)
}

fn resolve<I: IntoIterator<Item = T>, T: Into<TypeName>>(types: I) -> ContainerVerdict {
    resolve_set(TypeSet::of(types))
}

fn supported<I: IntoIterator<Item = T>, T: Into<TypeName>>(accepted: I) -> ContainerVerdict {
    ContainerVerdict::Supported {
        accepted: TypeSet::of(accepted),
    }
}

fn unsupported<I: IntoIterator<Item = T>, T: Into<TypeName>>(reported: I) -> ContainerVerdict {
    ContainerVerdict::Unsupported {
        reported: TypeSet::of(reported),
    }
}

fn inconclusive() -> ContainerVerdict {
    ContainerVerdict::inconclusive()
}

#[test]
fn mixed_is_inconclusive() {
    assert_eq!(resolve([Mixed]), inconclusive());
    assert_eq!(resolve([Integer, Mixed, Boolean]), inconclusive());
}

#[test]
fn loop_keys_are_inconclusive() {
    assert_eq!(resolve([Integer, String]), inconclusive());
    assert_eq!(resolve([String, Integer]), inconclusive());
}

#[test]
fn arrays_and_strings() {
    assert_eq!(resolve([Array]), supported([String, Integer]));
    assert_eq!(resolve([String, Array]), supported([String, Integer]));
    assert_eq!(resolve(["\\array"]), supported([String, Integer]));
}

#[test]
fn callable_may_be_array_or_string() {
    let normalized = normalize_container_types(TypeSet::of([Callable]));
    assert_eq!(normalized, Some(TypeSet::of([Array, String])));
    assert_eq!(resolve([Callable]), supported([String, Integer]));
}

#[test]
fn null_and_object_are_ignored() {
    assert_eq!(resolve([Null]), inconclusive());
    assert_eq!(resolve([Object]), inconclusive());
    assert_eq!(resolve_set(TypeSet::new()), inconclusive());
    assert_eq!(resolve([Array, Null]), supported([String, Integer]));
}

#[test]
fn scalars_are_unsupported() {
    assert_eq!(resolve([Integer]), unsupported([Integer]));
    assert_eq!(resolve([Boolean, Null]), unsupported([Boolean]));
    assert_eq!(resolve(["static"]), unsupported(["static"]));
}

#[test]
fn any_scalar_rejects_the_container() {
    assert_eq!(resolve([Array, Integer]), unsupported([Array, Integer]));
    assert_eq!(resolve([Integer, Array]), unsupported([Integer, Array]));
    assert_eq!(
        resolve(["\\App\\Settings", "float"]),
        unsupported(["\\App\\Settings", "float"])
    );
}

#[test]
fn offset_methods_define_accepted_types() {
    assert_eq!(resolve(["\\App\\Settings"]), supported([String]));
    assert_eq!(resolve(["\\app\\settings"]), supported([String]));
}

#[test]
fn inherited_offset_methods() {
    assert_eq!(resolve(["\\App\\Child"]), supported([String]));
}

#[test]
fn untyped_offset_key_accepts_anything() {
    assert_eq!(resolve(["\\App\\Untyped"]), supported([Mixed]));
}

#[test]
fn magic_accessors() {
    assert_eq!(resolve(["\\App\\Magic"]), supported([String, Integer]));
}

#[test]
fn classes_without_offset_support() {
    assert_eq!(resolve(["\\App\\Plain"]), unsupported(["\\App\\Plain"]));
    assert_eq!(resolve(["\\App\\Missing"]), unsupported(["\\App\\Missing"]));
}

#[test]
fn one_supporting_candidate_is_enough() {
    assert_eq!(
        resolve(["\\App\\Plain", "\\App\\Settings"]),
        supported([String])
    );
    assert_eq!(
        resolve(["\\App\\Settings", "array"]),
        supported([String, Integer])
    );
}

#[test]
fn duplicate_declarations_are_merged() {
    let table = TypeTable::new();
    let integer_key = keyed("offsetGet", Some(TypeSet::of([Integer])));
    let directory = ClassIndex::from_classes([
        class("\\App\\Bag"),
        class("\\App\\Bag").with_method(integer_key),
    ]);
    let resolver = CapabilityResolver::new(&table, &directory);
    assert_eq!(
        resolver.resolve_types(TypeSet::of(["\\App\\Bag"])),
        supported([Integer])
    );
}

fn resolve_first_access(yaml: &str, analyze_array_push: bool) -> Result<ContainerVerdict> {
    let project = Project::from_yaml_str(yaml)?;
    let module = &project.modules[0];
    let mut verdict = None;
    for stmt in &module.stmts {
        crate::ast::walk_expr(stmt, false, &mut |expr, target| {
            if verdict.is_some() {
                return;
            }
            if let Some(site) = OffsetAccessSite::from_expr(expr, target) {
                let mut resolver =
                    CapabilityResolver::new(&project.types, &project.classes);
                if !analyze_array_push {
                    resolver = resolver.without_array_push();
                }
                verdict = Some(resolver.resolve(module, &site));
            }
        });
    }
    Ok(verdict.unwrap_or_else(ContainerVerdict::inconclusive))
}

#[test]
fn partially_unknown_containers_are_inconclusive() -> Result<()> {
    let verdict = resolve_first_access(
        r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [integer], unknown: true }
          index: { literal: "0" }
"#,
        true,
    )?;
    assert_eq!(verdict, ContainerVerdict::inconclusive());
    Ok(())
}

#[test]
fn push_assignment_uses_scope_inference() -> Result<()> {
    let yaml = r#"
files:
  - path: a.php
    statements:
      - assign:
          target:
            access:
              container: { var: $x, types: [array], inferred: [integer] }
          value: { literal: "1" }
"#;
    assert_eq!(resolve_first_access(yaml, true)?, unsupported([Integer]));
    let without_push = resolve_first_access(yaml, false)?;
    assert_eq!(without_push, supported([String, Integer]));
    Ok(())
}

#[test]
fn reads_do_not_use_scope_inference() -> Result<()> {
    let yaml = r#"
files:
  - path: a.php
    statements:
      - access:
          container: { var: $x, types: [array], inferred: [integer] }
          index: { literal: "0", types: [integer] }
"#;
    let verdict = resolve_first_access(yaml, true)?;
    assert_eq!(verdict, supported([String, Integer]));
    Ok(())
}
