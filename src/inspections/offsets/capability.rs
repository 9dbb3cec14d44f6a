// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decides whether a container value supports offset access and which index
//! types it accepts.

use crate::ast::{Expr, Module, OffsetAccessSite};
use crate::directory::ClassDirectory;
use crate::inspections::InspectionContext;
use crate::oracle::TypeOracle;
use crate::types::{BuiltinType, ClassName, TypeName, TypeSet};

use log::{debug, trace};

/// Outcome of analysing the container of one offset access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerVerdict {
    /// Offsets are supported. An empty `accepted` set means the index types
    /// are not known and must not be checked.
    Supported { accepted: TypeSet },
    /// Offsets may not be supported; `reported` names the container types
    /// responsible.
    Unsupported { reported: TypeSet },
}

impl ContainerVerdict {
    /// Nothing conclusive could be said about the container.
    pub fn inconclusive() -> Self {
        ContainerVerdict::Supported {
            accepted: TypeSet::new(),
        }
    }

    pub fn supports_offsets(&self) -> bool {
        matches!(self, ContainerVerdict::Supported { .. })
    }
}

/// Index types arrays, strings and magic accessors are keyed by.
pub fn regular_index_types() -> TypeSet {
    TypeSet::of([BuiltinType::String, BuiltinType::Integer])
}

/// Prepare container types for analysis.
///
/// Returns `None` when the types say nothing useful about offset support.
pub fn normalize_container_types(mut types: TypeSet) -> Option<TypeSet> {
    if types.contains_builtin(BuiltinType::Mixed) {
        trace!("container is mixed");
        return None;
    }

    // foreach keys over arbitrary values are reported exactly this way
    if types.is_exactly(&[BuiltinType::Integer, BuiltinType::String]) {
        trace!("container looks like a loop key");
        return None;
    }

    if types.remove(&BuiltinType::Callable.into()) {
        types.insert(BuiltinType::Array);
        types.insert(BuiltinType::String);
    }

    for ignored in [BuiltinType::Null, BuiltinType::Object, BuiltinType::Never] {
        types.remove(&ignored.into());
    }

    if types.is_empty() {
        None
    } else {
        Some(types)
    }
}

pub struct CapabilityResolver<'a> {
    oracle: &'a dyn TypeOracle,
    directory: &'a dyn ClassDirectory,
    analyze_array_push: bool,
}

impl<'a> CapabilityResolver<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, directory: &'a dyn ClassDirectory) -> Self {
        Self {
            oracle,
            directory,
            analyze_array_push: true,
        }
    }

    pub fn from_context(ctx: &InspectionContext<'a>) -> Self {
        Self {
            oracle: ctx.oracle,
            directory: ctx.directory,
            analyze_array_push: ctx.options.analyze_array_push,
        }
    }

    /// Resolve the container of `$x[] = value` like any other.
    pub fn without_array_push(mut self) -> Self {
        self.analyze_array_push = false;
        self
    }

    pub fn resolve(&self, module: &Module, site: &OffsetAccessSite<'_>) -> ContainerVerdict {
        match site.container {
            Some(container) => {
                let types = self.container_types(module, site, container);
                self.resolve_types(types)
            }
            None => ContainerVerdict::inconclusive(),
        }
    }

    fn container_types(
        &self,
        module: &Module,
        site: &OffsetAccessSite<'_>,
        container: &Expr,
    ) -> TypeSet {
        // The platform always reports `array` for the container of `$x[] = ...`.
        if self.analyze_array_push && site.is_push_assignment() {
            return self.oracle.infer_expression_type(module, container);
        }

        match self.oracle.resolve_type(module, container) {
            Some(resolved) if !resolved.has_unknown => resolved.types,
            _ => TypeSet::new(),
        }
    }

    /// Verdict for a container that may be any of `types`.
    pub fn resolve_types(&self, types: TypeSet) -> ContainerVerdict {
        let Some(candidates) = normalize_container_types(types) else {
            return ContainerVerdict::inconclusive();
        };

        let mut supported = false;
        let mut accepted = TypeSet::new();
        for candidate in &candidates {
            match candidate {
                TypeName::Builtin(BuiltinType::Array | BuiltinType::String) => {
                    supported = true;
                    accepted.extend(regular_index_types());
                }
                TypeName::Class(name) => {
                    if let Some(class_accepted) = self.class_index_types(name) {
                        supported = true;
                        accepted.extend(class_accepted);
                    }
                }
                scalar => {
                    // A single scalar candidate rejects the whole container.
                    debug!("{scalar} does not support offsets: {candidates}");
                    return ContainerVerdict::Unsupported {
                        reported: candidates.clone(),
                    };
                }
            }
        }

        if supported {
            debug!("container {candidates} accepts {accepted}");
            ContainerVerdict::Supported { accepted }
        } else {
            ContainerVerdict::Unsupported {
                reported: candidates,
            }
        }
    }

    /// Index types accepted by instances of `name`, or `None` when none of
    /// its declarations supports offset access.
    fn class_index_types(&self, name: &ClassName) -> Option<TypeSet> {
        let mut supported = false;
        let mut accepted = TypeSet::new();

        for class in self.directory.implementors_of(name) {
            let mut has_offset_methods = false;
            for method_name in ["offsetSet", "offsetGet"] {
                if let Some(method) = self.directory.find_method(&class, method_name) {
                    trace!("{} {} declares {method_name}", class.kind, class.name);
                    if let Some(types) = method.first_parameter_types() {
                        accepted.extend(types);
                    }
                    supported = true;
                    has_offset_methods = true;
                }
            }
            if has_offset_methods {
                continue;
            }

            let magic = self
                .directory
                .find_method(&class, "__get")
                .or_else(|| self.directory.find_method(&class, "__set"));
            if let Some(magic) = magic {
                trace!("{} {} declares {}", class.kind, class.name, magic.name);
                supported = true;
                accepted.extend(regular_index_types());
            }
        }

        supported.then_some(accepted)
    }
}
