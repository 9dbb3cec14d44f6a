// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::Module;
use crate::directory::ClassDirectory;
use crate::inspections::{
    inspect_module, Inspection, InspectionContext, OffsetOperationsInspection,
};
use crate::options::InspectionOptions;
use crate::oracle::TypeOracle;
use crate::problems::{Problem, ProblemsHolder};
use crate::project::Project;

use log::{debug, info};

/// Runs registered inspections over modules.
pub struct Engine {
    inspections: Vec<Box<dyn Inspection>>,
    options: InspectionOptions,
}

/// Create an engine with the offset operations inspection registered.
impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            inspections: vec![Box::new(OffsetOperationsInspection)],
            options: InspectionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InspectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: InspectionOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &InspectionOptions {
        &self.options
    }

    pub fn add_inspection(&mut self, inspection: Box<dyn Inspection>) {
        self.inspections.push(inspection);
    }

    pub fn inspection_names(&self) -> Vec<&'static str> {
        self.inspections.iter().map(|i| i.short_name()).collect()
    }

    /// Problems found in `module`, in visit order.
    pub fn analyze_module(
        &self,
        module: &Module,
        oracle: &dyn TypeOracle,
        directory: &dyn ClassDirectory,
    ) -> Vec<Problem> {
        let ctx = InspectionContext {
            module,
            oracle,
            directory,
            options: &self.options,
        };

        let mut holder = ProblemsHolder::new();
        for inspection in &self.inspections {
            if !self.options.is_enabled(inspection.short_name()) {
                debug!("{} is disabled", inspection.short_name());
                continue;
            }
            inspect_module(inspection.as_ref(), &ctx, &mut holder);
        }
        holder.into_problems()
    }

    pub fn analyze_project(&self, project: &Project) -> Vec<Problem> {
        let mut problems = vec![];
        for module in &project.modules {
            let found = self.analyze_module(module, &project.types, &project.classes);
            problems.extend(found);
        }
        info!(
            "{} problem(s) in {} file(s)",
            problems.len(),
            project.modules.len()
        );
        problems
    }
}
