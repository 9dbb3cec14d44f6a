// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Error type for assembling a project from a fixture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    /// Fixture file is neither json nor yaml
    #[error("Unsupported project file `{0}`. Must be json or yaml.")]
    UnsupportedFormat(String),
    /// Two files share a path
    #[error("Duplicate file `{0}` in project")]
    DuplicateFile(String),
    /// A variable node without a name
    #[error("{file}: statement {stmt}: variable name must not be empty")]
    EmptyVariableName { file: String, stmt: usize },
}
