// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Offset access analysis.
//!
//! For every `container[index]` the container's types decide whether offset
//! access is supported at all and, if so, which index types are accepted.
//! The index expression's types are then checked against those.

pub mod capability;
pub mod compatibility;

pub use capability::{normalize_container_types, CapabilityResolver, ContainerVerdict};
pub use compatibility::filter_incompatible;

use crate::ast::{Bracket, Expr, OffsetAccessSite};
use crate::inspections::{Inspection, InspectionContext};
use crate::problems::{Problem, ProblemSink, QuickFix, Severity, TextEdit};
use crate::types::TypeSet;

pub const MESSAGE_USE_SQUARE_BRACKETS: &str =
    "Using [ ] instead of { } makes possible to analyze this expression.";

pub fn no_offset_support_message(container: &str, types: &TypeSet) -> String {
    format!(
        "'{container}' may not support offset operations (or its type not annotated properly: {types})."
    )
}

pub fn invalid_index_message(index_types: &TypeSet, accepted: &TypeSet) -> String {
    format!(
        "Resolved index type ({index_types}) is incompatible with possible {accepted}. Probably just proper type hinting needed."
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OffsetOperationsInspection;

impl OffsetOperationsInspection {
    pub const SHORT_NAME: &'static str = "OffsetOperationsInspection";

    fn check_index(
        &self,
        ctx: &InspectionContext<'_>,
        index: &Expr,
        accepted: &TypeSet,
        holder: &mut dyn ProblemSink,
    ) {
        let Some(resolved) = ctx.oracle.resolve_type(ctx.module, index) else {
            return;
        };
        let index_types = resolved.filter_unknown();
        if index_types.is_empty() {
            return;
        }

        let incompatible = filter_incompatible(&index_types, accepted);
        if !incompatible.is_empty() {
            holder.report(Problem::new(
                Self::SHORT_NAME,
                index.span(),
                invalid_index_message(&incompatible, accepted),
                Severity::Warning,
            ));
        }
    }
}

impl Inspection for OffsetOperationsInspection {
    fn short_name(&self) -> &'static str {
        Self::SHORT_NAME
    }

    fn description(&self) -> &'static str {
        "Reports offset access on values that may not support it and indexes of incompatible types"
    }

    fn visit_offset_access(
        &self,
        ctx: &InspectionContext<'_>,
        site: &OffsetAccessSite<'_>,
        holder: &mut dyn ProblemSink,
    ) {
        let (Some(container), Some(bracket)) = (site.container, site.bracket) else {
            return;
        };

        if bracket == Bracket::Curly && ctx.options.promote_square_brackets {
            let mut problem = Problem::new(
                Self::SHORT_NAME,
                site.expr.span(),
                MESSAGE_USE_SQUARE_BRACKETS.to_string(),
                Severity::WeakWarning,
            );
            if let Some(fix) = square_brackets_fix(site.expr, container) {
                problem = problem.with_fix(fix);
            }
            holder.report(problem);
            return;
        }

        let resolver = CapabilityResolver::from_context(ctx);
        let accepted = match resolver.resolve(ctx.module, site) {
            ContainerVerdict::Supported { accepted } => accepted,
            ContainerVerdict::Unsupported { reported } => {
                if !reported.is_empty() {
                    holder.report(Problem::new(
                        Self::SHORT_NAME,
                        site.expr.span(),
                        no_offset_support_message(container.text(), &reported),
                        Severity::Warning,
                    ));
                }
                return;
            }
        };

        // TODO: check keys of array literals such as ['key' => $value] too.
        if accepted.is_empty() || !ctx.options.check_index_types {
            return;
        }
        if let Some(index) = site.index {
            self.check_index(ctx, index, &accepted, holder);
        }
    }
}

/// Edits turning `$x{...}` into `$x[...]`.
fn square_brackets_fix(access: &Expr, container: &Expr) -> Option<QuickFix> {
    let span = access.span();
    let contents = span.source.contents();
    let container_end = container.span().end as usize;
    let end = span.end as usize;

    let open = container_end + contents.get(container_end..end)?.find('{')?;
    let close = end.checked_sub(1)?;
    if close <= open || contents.as_bytes().get(close) != Some(&b'}') {
        return None;
    }

    Some(QuickFix {
        name: "Use [ ] for offset access".to_string(),
        edits: vec![
            TextEdit {
                start: open as u32,
                end: open as u32 + 1,
                replacement: "[".to_string(),
            },
            TextEdit {
                start: close as u32,
                end: close as u32 + 1,
                replacement: "]".to_string(),
            },
        ],
    })
}
