// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::source::{Source, Span};
use crate::Rc;

use core::{cmp, fmt, ops::Deref};
use serde::{Deserialize, Serialize};

pub struct NodeRef<T> {
    r: Rc<T>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self { r: self.r.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.r.as_ref().fmt(f)
    }
}

impl<T> cmp::PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.r).eq(&Rc::as_ptr(&other.r))
    }
}

impl<T> cmp::Eq for NodeRef<T> {}

impl<T> Deref for NodeRef<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.r
    }
}

impl<T> AsRef<T> for NodeRef<T> {
    fn as_ref(&self) -> &T {
        self.deref()
    }
}

impl<T> NodeRef<T> {
    pub fn new(t: T) -> Self {
        Self { r: Rc::new(t) }
    }
}

pub type Ref<T> = NodeRef<T>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    #[default]
    Square,
    Curly,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

#[derive(Debug)]
pub enum Expr {
    Var {
        span: Span,
        eidx: u32,
    },

    Literal {
        span: Span,
        eidx: u32,
    },

    /// `container[index]` or `container{index}`.
    Access {
        span: Span,
        container: Option<Ref<Expr>>,
        index: Option<Ref<Expr>>,
        // None when the closing bracket is missing.
        bracket: Option<Bracket>,
        eidx: u32,
    },

    Assign {
        span: Span,
        target: Ref<Expr>,
        value: Ref<Expr>,
        eidx: u32,
    },

    Call {
        span: Span,
        callee: Rc<str>,
        args: Vec<Ref<Expr>>,
        eidx: u32,
    },

    Property {
        span: Span,
        object: Ref<Expr>,
        name: Rc<str>,
        eidx: u32,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Var { span, .. }
            | Expr::Literal { span, .. }
            | Expr::Access { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Call { span, .. }
            | Expr::Property { span, .. } => span,
        }
    }

    pub fn eidx(&self) -> u32 {
        match self {
            Expr::Var { eidx, .. }
            | Expr::Literal { eidx, .. }
            | Expr::Access { eidx, .. }
            | Expr::Assign { eidx, .. }
            | Expr::Call { eidx, .. }
            | Expr::Property { eidx, .. } => *eidx,
        }
    }

    pub fn text(&self) -> &str {
        self.span().text()
    }
}

/// A parsed file: its source text and top-level statements.
#[derive(Debug)]
pub struct Module {
    pub idx: u32,
    pub source: Source,
    pub stmts: Vec<Ref<Expr>>,
    pub num_expressions: u32,
}

impl Module {
    pub fn file(&self) -> &str {
        self.source.file()
    }
}

/// Read-only view of an offset access node and its syntactic context.
#[derive(Debug, Clone, Copy)]
pub struct OffsetAccessSite<'a> {
    pub expr: &'a Expr,
    pub container: Option<&'a Ref<Expr>>,
    pub index: Option<&'a Ref<Expr>>,
    pub bracket: Option<Bracket>,
    /// The access is the left-hand side of an assignment.
    pub assignment_target: bool,
}

impl<'a> OffsetAccessSite<'a> {
    pub fn from_expr(expr: &'a Expr, assignment_target: bool) -> Option<Self> {
        match expr {
            Expr::Access {
                container,
                index,
                bracket,
                ..
            } => Some(Self {
                expr,
                container: container.as_ref(),
                index: index.as_ref(),
                bracket: *bracket,
                assignment_target,
            }),
            _ => None,
        }
    }

    /// `$container[] = value`.
    pub fn is_push_assignment(&self) -> bool {
        self.assignment_target && self.index.is_none()
    }
}

/// Visit every expression of the tree in pre-order.
///
/// The callback receives each node and whether it is the target of an
/// enclosing assignment.
pub fn walk_expr<'a, F>(expr: &'a Expr, assignment_target: bool, f: &mut F)
where
    F: FnMut(&'a Expr, bool),
{
    f(expr, assignment_target);
    match expr {
        Expr::Var { .. } | Expr::Literal { .. } => (),
        Expr::Access {
            container, index, ..
        } => {
            if let Some(container) = container {
                walk_expr(container, false, f);
            }
            if let Some(index) = index {
                walk_expr(index, false, f);
            }
        }
        Expr::Assign { target, value, .. } => {
            walk_expr(target, true, f);
            walk_expr(value, false, f);
        }
        Expr::Call { args, .. } => {
            for arg in args {
                walk_expr(arg, false, f);
            }
        }
        Expr::Property { object, .. } => walk_expr(object, false, f),
    }
}
