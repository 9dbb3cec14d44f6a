// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::{BuiltinType, TypeSet};

/// Index types from `possible` that `accepted` does not allow.
///
/// Matching is by exact name, with `object` standing for any class and
/// `mixed` for anything. Class hierarchies are not consulted.
pub fn filter_incompatible(possible: &TypeSet, accepted: &TypeSet) -> TypeSet {
    let any_object = accepted.contains_builtin(BuiltinType::Object);
    let any_value = accepted.contains_builtin(BuiltinType::Mixed);

    possible
        .iter()
        .filter(|ty| {
            // mixed and null are assumed to be covered by the caller's intent
            if ty.is_builtin(BuiltinType::Mixed)
                || ty.is_builtin(BuiltinType::Null)
                || accepted.contains(ty)
            {
                return false;
            }
            if any_object && ty.is_class_like() {
                return false;
            }
            !any_value
        })
        .cloned()
        .collect()
}
