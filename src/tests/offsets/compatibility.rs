// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::inspections::offsets::filter_incompatible;
use crate::types::{BuiltinType::*, TypeSet};

#[test]
fn reflexive() {
    let strings = TypeSet::of([String]);
    assert!(filter_incompatible(&strings, &strings).is_empty());
}

#[test]
fn mixed_accepts_anything() {
    let possible = TypeSet::of(["boolean", "float", "\\App\\Key", "array"]);
    let accepted = TypeSet::of([Mixed]);
    assert!(filter_incompatible(&possible, &accepted).is_empty());
}

#[test]
fn mixed_and_null_indexes_are_compatible() {
    let possible = TypeSet::of([Mixed, Null]);
    let accepted = TypeSet::of([Integer]);
    assert!(filter_incompatible(&possible, &accepted).is_empty());
}

#[test]
fn object_accepts_classes_only() {
    let possible = TypeSet::of(["\\App\\Key", "integer"]);
    let accepted = TypeSet::of([Object]);
    assert_eq!(
        filter_incompatible(&possible, &accepted),
        TypeSet::of([Integer])
    );
}

#[test]
fn keeps_every_incompatible_type() {
    let possible = TypeSet::of([Boolean, String, Float]);
    let accepted = TypeSet::of([String, Integer]);
    let incompatible = filter_incompatible(&possible, &accepted);
    assert_eq!(incompatible.to_string(), "[boolean, float]");
}

#[test]
fn class_hierarchy_is_not_consulted() {
    let possible = TypeSet::of(["\\App\\SpecialKey"]);
    let accepted = TypeSet::of(["\\App\\Key"]);
    assert_eq!(filter_incompatible(&possible, &accepted), possible);
}
