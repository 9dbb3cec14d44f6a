// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::source::Span;
use crate::Rc;

use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Style and modernization hints.
    WeakWarning,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::WeakWarning => "weak warning",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Replace the byte range `start..end` of the file with `replacement`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
}

/// Automated fix offered alongside a problem. Applying it is up to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuickFix {
    pub name: String,
    pub edits: Vec<TextEdit>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Problem {
    pub inspection: &'static str,
    pub message: String,
    pub severity: Severity,
    pub file: Rc<str>,
    /// Source text of the node the problem is anchored at.
    pub anchor: String,
    pub line: u32,
    pub col: u32,
    pub end_line: u32,
    pub end_col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<QuickFix>,
}

impl Problem {
    pub fn new(
        inspection: &'static str,
        anchor: &Span,
        message: String,
        severity: Severity,
    ) -> Self {
        let (end_line, end_col) = anchor.end_line_col();
        Problem {
            inspection,
            message,
            severity,
            file: anchor.file().into(),
            anchor: anchor.text().to_string(),
            line: anchor.line,
            col: anchor.col,
            end_line,
            end_col,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: QuickFix) -> Self {
        self.fix = Some(fix);
        self
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} [{}]",
            self.file, self.line, self.col, self.severity, self.message, self.inspection
        )
    }
}

/// Receiver of problems found by inspections.
pub trait ProblemSink {
    fn report(&mut self, problem: Problem);
}

/// Collects reported problems in order.
#[derive(Debug, Default)]
pub struct ProblemsHolder {
    problems: Vec<Problem>,
}

impl ProblemsHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<Problem> {
        self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

impl ProblemSink for ProblemsHolder {
    fn report(&mut self, problem: Problem) {
        log::debug!("{problem}");
        self.problems.push(problem);
    }
}
