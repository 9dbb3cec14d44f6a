// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{Engine, InspectionOptions, Problem, Project};

use anyhow::Result;

/// Load a yaml project and run the default engine over it.
pub(crate) fn analyze_yaml(yaml: &str) -> Result<Vec<Problem>> {
    analyze_yaml_with(yaml, InspectionOptions::default())
}

pub(crate) fn analyze_yaml_with(yaml: &str, options: InspectionOptions) -> Result<Vec<Problem>> {
    let project = Project::from_yaml_str(yaml)?;
    let engine = Engine::new().with_options(options);
    Ok(engine.analyze_project(&project))
}
