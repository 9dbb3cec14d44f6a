// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

#[cfg(feature = "arc")]
pub use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
pub use std::rc::Rc;

pub mod ast;
pub mod directory;
mod engine;
mod error;
pub mod inspections;
pub mod lookup;
pub mod options;
pub mod oracle;
pub mod problems;
pub mod project;
pub mod source;
pub mod types;

pub use directory::{ClassDirectory, ClassIndex};
pub use engine::Engine;
pub use error::ProjectError;
pub use inspections::{Inspection, OffsetOperationsInspection};
pub use options::InspectionOptions;
pub use oracle::{ResolvedType, TypeOracle, TypeTable};
pub use problems::{Problem, ProblemSink, ProblemsHolder, Severity};
pub use project::Project;
pub use types::{BuiltinType, ClassName, TypeName, TypeSet};

#[cfg(test)]
mod tests;
