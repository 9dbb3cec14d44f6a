// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Access to statically inferred expression types.
//!
//! Type inference itself happens elsewhere. The inspections only consume its
//! output through [`TypeOracle`], which keeps them testable against a plain
//! [`TypeTable`].

use crate::ast::{Expr, Module};
use crate::lookup::Lookup;
use crate::types::TypeSet;

/// What the oracle knows about one expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedType {
    /// Types the oracle could name.
    pub types: TypeSet,
    /// Part of the type could not be resolved.
    pub has_unknown: bool,
}

impl ResolvedType {
    pub fn new(types: TypeSet) -> Self {
        Self {
            types,
            has_unknown: false,
        }
    }

    pub fn with_unknown(mut self) -> Self {
        self.has_unknown = true;
        self
    }

    /// The named types, dropping the unresolved part.
    pub fn filter_unknown(&self) -> TypeSet {
        self.types.clone()
    }
}

pub trait TypeOracle {
    /// Types the platform resolves for `expr`, or `None` when the expression
    /// carries no type information at all.
    fn resolve_type(&self, module: &Module, expr: &Expr) -> Option<ResolvedType>;

    /// Broader inference from the surrounding scope.
    ///
    /// Used for `$container[] = value` targets, where the platform reports
    /// `array` regardless of the container's declared type.
    fn infer_expression_type(&self, module: &Module, expr: &Expr) -> TypeSet {
        match self.resolve_type(module, expr) {
            Some(resolved) if !resolved.has_unknown => resolved.types,
            _ => TypeSet::new(),
        }
    }
}

/// Oracle backed by precomputed per-expression tables.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    resolved: Lookup<ResolvedType>,
    inferred: Lookup<TypeSet>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for every expression of a module.
    pub fn reserve_module(&mut self, module_idx: u32, num_expressions: u32) {
        self.resolved.reserve_module(module_idx, num_expressions);
        self.inferred.reserve_module(module_idx, num_expressions);
    }

    pub fn set_resolved(&mut self, module_idx: u32, eidx: u32, resolved: ResolvedType) {
        self.resolved.set(module_idx, eidx, resolved);
    }

    pub fn set_inferred(&mut self, module_idx: u32, eidx: u32, types: TypeSet) {
        self.inferred.set(module_idx, eidx, types);
    }
}

impl TypeOracle for TypeTable {
    fn resolve_type(&self, module: &Module, expr: &Expr) -> Option<ResolvedType> {
        self.resolved.get(module.idx, expr.eidx()).cloned()
    }

    fn infer_expression_type(&self, module: &Module, expr: &Expr) -> TypeSet {
        match self.inferred.get(module.idx, expr.eidx()) {
            Some(types) => types.clone(),
            None => match self.resolve_type(module, expr) {
                Some(resolved) if !resolved.has_unknown => resolved.types,
                _ => TypeSet::new(),
            },
        }
    }
}
