// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Inspection framework.
//!
//! An [`Inspection`] receives callbacks for the syntax it is interested in
//! and reports problems to a [`ProblemSink`]. [`inspect_module`] walks a
//! module and dispatches to one inspection.

pub mod offsets;

pub use offsets::OffsetOperationsInspection;

use crate::ast::{walk_expr, Module, OffsetAccessSite};
use crate::directory::ClassDirectory;
use crate::options::InspectionOptions;
use crate::oracle::TypeOracle;
use crate::problems::ProblemSink;

/// Collaborators available to an inspection while visiting one module.
#[derive(Clone, Copy)]
pub struct InspectionContext<'a> {
    pub module: &'a Module,
    pub oracle: &'a dyn TypeOracle,
    pub directory: &'a dyn ClassDirectory,
    pub options: &'a InspectionOptions,
}

pub trait Inspection {
    /// Stable identifier, used in reports and to disable the inspection.
    fn short_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn visit_offset_access(
        &self,
        _ctx: &InspectionContext<'_>,
        _site: &OffsetAccessSite<'_>,
        _holder: &mut dyn ProblemSink,
    ) {
    }
}

/// Run `inspection` over every statement of the context's module.
pub fn inspect_module(
    inspection: &dyn Inspection,
    ctx: &InspectionContext<'_>,
    holder: &mut dyn ProblemSink,
) {
    log::trace!(
        "running {} over {}",
        inspection.short_name(),
        ctx.module.file()
    );
    for stmt in &ctx.module.stmts {
        walk_expr(stmt, false, &mut |expr, assignment_target| {
            if let Some(site) = OffsetAccessSite::from_expr(expr, assignment_target) {
                inspection.visit_offset_access(ctx, &site, holder);
            }
        });
    }
}
