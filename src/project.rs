// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Project fixtures.
//!
//! Parsing and type inference are provided by the host. A fixture stands in
//! for both: it describes each file's statements as expression trees
//! annotated with the types the oracle would report, plus the class-like
//! declarations of the project. Loading a fixture renders the source text,
//! assigns expression indices and spans, and fills a [`TypeTable`] and a
//! [`ClassIndex`].
//!
//! ```yaml
//! classes:
//!   - name: \App\Bag
//!     implements: [\ArrayAccess]
//!     methods:
//!       - name: offsetGet
//!         parameters: [{ name: key, types: [string] }]
//! files:
//!   - path: src/index.php
//!     statements:
//!       - access:
//!           container: { var: $bag, types: [\App\Bag] }
//!           index: { literal: "0", types: [integer] }
//! ```

use crate::ast::{Bracket, Expr, Module, Ref};
use crate::directory::{ClassIndex, ClassLike};
use crate::error::ProjectError;
use crate::oracle::{ResolvedType, TypeTable};
use crate::source::Source;
use crate::types::TypeSet;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprKindDecl {
    Var(String),
    Literal(String),
    Access {
        #[serde(default)]
        container: Option<Box<ExprDecl>>,
        #[serde(default)]
        index: Option<Box<ExprDecl>>,
        #[serde(default)]
        bracket: Bracket,
        /// The closing bracket is missing.
        #[serde(default)]
        unterminated: bool,
    },
    Assign {
        target: Box<ExprDecl>,
        value: Box<ExprDecl>,
    },
    Call {
        callee: String,
        #[serde(default)]
        args: Vec<ExprDecl>,
    },
    Property {
        object: Box<ExprDecl>,
        name: String,
    },
}

/// One expression node and what the oracle knows about it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExprDecl {
    #[serde(flatten)]
    pub kind: ExprKindDecl,
    /// Types the oracle resolves. Absent means no type information.
    #[serde(default)]
    pub types: Option<TypeSet>,
    /// Part of the type is unresolved.
    #[serde(default)]
    pub unknown: bool,
    /// Result of scope inference, if it differs from `types`.
    #[serde(default)]
    pub inferred: Option<TypeSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDecl {
    pub path: String,
    #[serde(default)]
    pub statements: Vec<ExprDecl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDecl {
    #[serde(default)]
    pub classes: Vec<ClassLike>,
    #[serde(default)]
    pub files: Vec<FileDecl>,
}

/// Modules together with the oracle and directory describing them.
#[derive(Debug, Default)]
pub struct Project {
    pub modules: Vec<Ref<Module>>,
    pub types: TypeTable,
    pub classes: ClassIndex,
}

impl Project {
    pub fn from_decl(decl: &ProjectDecl) -> Result<Self> {
        let mut types = TypeTable::new();
        let mut modules = Vec::with_capacity(decl.files.len());
        let mut paths = BTreeSet::new();

        for (idx, file) in decl.files.iter().enumerate() {
            if !paths.insert(file.path.as_str()) {
                return Err(ProjectError::DuplicateFile(file.path.clone()).into());
            }
            let module = build_module(idx as u32, file, &mut types)
                .with_context(|| format!("Failed to load {}", file.path))?;
            modules.push(Ref::new(module));
        }

        Ok(Project {
            modules,
            types,
            classes: ClassIndex::from_classes(decl.classes.iter().cloned()),
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let decl: ProjectDecl = serde_yaml::from_str(yaml)?;
        Self::from_decl(&decl)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let decl: ProjectDecl = serde_json::from_str(json)?;
        Self::from_decl(&decl)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => {
                let file = path.display().to_string();
                Err(ProjectError::UnsupportedFormat(file).into())
            }
        }
    }

    pub fn module(&self, path: &str) -> Option<&Ref<Module>> {
        self.modules.iter().find(|m| m.file() == path)
    }
}

/// Node laid out in the rendered text but not yet bound to a [`Source`].
struct Draft<'s> {
    decl: &'s ExprDecl,
    start: u32,
    end: u32,
    eidx: u32,
    kind: DraftKind<'s>,
}

enum DraftKind<'s> {
    Var,
    Literal,
    Access {
        container: Option<Box<Draft<'s>>>,
        index: Option<Box<Draft<'s>>>,
        bracket: Option<Bracket>,
    },
    Assign {
        target: Box<Draft<'s>>,
        value: Box<Draft<'s>>,
    },
    Call {
        callee: &'s str,
        args: Vec<Draft<'s>>,
    },
    Property {
        object: Box<Draft<'s>>,
        name: &'s str,
    },
}

#[derive(Default)]
struct Layout {
    text: String,
    next_eidx: u32,
}

impl Layout {
    fn pos(&self) -> u32 {
        self.text.len() as u32
    }

    fn lay<'s>(&mut self, decl: &'s ExprDecl) -> Draft<'s> {
        let eidx = self.next_eidx;
        self.next_eidx += 1;
        let start = self.pos();

        let kind = match &decl.kind {
            ExprKindDecl::Var(name) => {
                self.text.push_str(name);
                DraftKind::Var
            }
            ExprKindDecl::Literal(text) => {
                self.text.push_str(text);
                DraftKind::Literal
            }
            ExprKindDecl::Access {
                container,
                index,
                bracket,
                unterminated,
            } => {
                let container = container.as_deref().map(|c| Box::new(self.lay(c)));
                self.text.push(bracket.open());
                let index = index.as_deref().map(|i| Box::new(self.lay(i)));
                if !unterminated {
                    self.text.push(bracket.close());
                }
                DraftKind::Access {
                    container,
                    index,
                    bracket: (!unterminated).then_some(*bracket),
                }
            }
            ExprKindDecl::Assign { target, value } => {
                let target = Box::new(self.lay(target));
                self.text.push_str(" = ");
                let value = Box::new(self.lay(value));
                DraftKind::Assign { target, value }
            }
            ExprKindDecl::Call { callee, args } => {
                self.text.push_str(callee);
                self.text.push('(');
                let mut laid = Vec::with_capacity(args.len());
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        self.text.push_str(", ");
                    }
                    laid.push(self.lay(arg));
                }
                self.text.push(')');
                DraftKind::Call { callee, args: laid }
            }
            ExprKindDecl::Property { object, name } => {
                let object = Box::new(self.lay(object));
                self.text.push_str("->");
                self.text.push_str(name);
                DraftKind::Property { object, name }
            }
        };

        Draft {
            decl,
            start,
            end: self.pos(),
            eidx,
            kind,
        }
    }
}

fn build_module(idx: u32, file: &FileDecl, types: &mut TypeTable) -> Result<Module> {
    let mut layout = Layout::default();
    let mut drafts = Vec::with_capacity(file.statements.len());
    for (stmt_idx, stmt) in file.statements.iter().enumerate() {
        check_names(stmt, &file.path, stmt_idx)?;
        drafts.push(layout.lay(stmt));
        layout.text.push_str(";\n");
    }

    let num_expressions = layout.next_eidx;
    let source = Source::from_contents(file.path.clone(), layout.text)?;
    types.reserve_module(idx, num_expressions);
    let stmts = drafts
        .into_iter()
        .map(|draft| bind(draft, &source, idx, types))
        .collect();

    Ok(Module {
        idx,
        source,
        stmts,
        num_expressions,
    })
}

fn check_names(decl: &ExprDecl, file: &str, stmt: usize) -> Result<(), ProjectError> {
    let empty_var = || ProjectError::EmptyVariableName {
        file: file.to_string(),
        stmt,
    };
    match &decl.kind {
        ExprKindDecl::Var(name) if name.trim().is_empty() => Err(empty_var()),
        ExprKindDecl::Var(_) | ExprKindDecl::Literal(_) => Ok(()),
        ExprKindDecl::Access {
            container, index, ..
        } => {
            for child in container.iter().chain(index.iter()) {
                check_names(child, file, stmt)?;
            }
            Ok(())
        }
        ExprKindDecl::Assign { target, value } => {
            check_names(target, file, stmt)?;
            check_names(value, file, stmt)
        }
        ExprKindDecl::Call { args, .. } => {
            for arg in args {
                check_names(arg, file, stmt)?;
            }
            Ok(())
        }
        ExprKindDecl::Property { object, .. } => check_names(object, file, stmt),
    }
}

fn bind(draft: Draft<'_>, source: &Source, module_idx: u32, types: &mut TypeTable) -> Ref<Expr> {
    let Draft {
        decl,
        start,
        end,
        eidx,
        kind,
    } = draft;

    match (&decl.types, decl.unknown) {
        (Some(resolved), unknown) => {
            let mut resolved = ResolvedType::new(resolved.clone());
            resolved.has_unknown = unknown;
            types.set_resolved(module_idx, eidx, resolved);
        }
        (None, true) => {
            types.set_resolved(module_idx, eidx, ResolvedType::default().with_unknown())
        }
        (None, false) => (),
    }
    if let Some(inferred) = &decl.inferred {
        types.set_inferred(module_idx, eidx, inferred.clone());
    }

    let span = source.span(start, end);
    let mut bind_child = |d| bind(d, source, module_idx, types);

    let expr = match kind {
        DraftKind::Var => Expr::Var { span, eidx },
        DraftKind::Literal => Expr::Literal { span, eidx },
        DraftKind::Access {
            container,
            index,
            bracket,
        } => {
            let container = container.map(|c| bind_child(*c));
            let index = index.map(|i| bind_child(*i));
            Expr::Access {
                span,
                container,
                index,
                bracket,
                eidx,
            }
        }
        DraftKind::Assign { target, value } => {
            let target = bind_child(*target);
            let value = bind_child(*value);
            Expr::Assign {
                span,
                target,
                value,
                eidx,
            }
        }
        DraftKind::Call { callee, args } => Expr::Call {
            span,
            callee: callee.into(),
            args: args.into_iter().map(&mut bind_child).collect(),
            eidx,
        },
        DraftKind::Property { object, name } => {
            let object = bind_child(*object);
            Expr::Property {
                span,
                object,
                name: name.into(),
                eidx,
            }
        }
    };

    Ref::new(expr)
}
