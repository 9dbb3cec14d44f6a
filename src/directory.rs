// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Class, interface and trait declarations known to the analysis.
//!
//! [`ClassDirectory`] answers the two questions offset analysis needs: which
//! declarations stand behind a class-like type name, and which methods such a
//! declaration has (including inherited ones). [`ClassIndex`] is the
//! in-memory backing; it can be assembled in code or loaded from YAML/JSON.

use crate::types::{BuiltinType, ClassName, TypeName, TypeSet};
use crate::Rc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

impl core::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    /// Declared types. Absent for untyped parameters.
    #[serde(default)]
    pub types: Option<TypeSet>,
}

impl ParameterDecl {
    pub fn new(name: &str, types: Option<TypeSet>) -> Self {
        Self {
            name: name.to_string(),
            types,
        }
    }

    /// Types the parameter accepts; untyped parameters accept anything.
    pub fn inferred_types(&self) -> TypeSet {
        match &self.types {
            Some(types) if !types.is_empty() => types.clone(),
            _ => TypeSet::of([BuiltinType::Mixed]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

impl MethodDecl {
    pub fn new(name: &str, parameters: Vec<ParameterDecl>) -> Self {
        Self {
            name: name.to_string(),
            parameters,
        }
    }

    /// Inferred types of the first parameter, if the method has parameters.
    pub fn first_parameter_types(&self) -> Option<TypeSet> {
        self.parameters.first().map(ParameterDecl::inferred_types)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassLike {
    pub name: ClassName,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub extends: Vec<ClassName>,
    #[serde(default)]
    pub implements: Vec<ClassName>,
    #[serde(default)]
    pub uses: Vec<ClassName>,
    #[serde(default)]
    pub methods: Vec<Rc<MethodDecl>>,
}

impl ClassLike {
    pub fn new(name: &str, kind: ClassKind) -> Self {
        Self {
            name: ClassName::new(name),
            kind,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            methods: vec![],
        }
    }

    pub fn extending(mut self, parent: &str) -> Self {
        self.extends.push(ClassName::new(parent));
        self
    }

    pub fn implementing(mut self, interface: &str) -> Self {
        self.implements.push(ClassName::new(interface));
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(Rc::new(method));
        self
    }

    /// Method declared directly on this class-like. Method names are
    /// case-insensitive.
    pub fn own_method(&self, name: &str) -> Option<&Rc<MethodDecl>> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Direct supertypes: traits first, then the parent chain, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &ClassName> {
        self.uses
            .iter()
            .chain(self.extends.iter())
            .chain(self.implements.iter())
    }
}

pub trait ClassDirectory {
    /// Declarations registered under a class-like name.
    fn implementors_of(&self, name: &ClassName) -> Vec<Rc<ClassLike>>;

    /// Find a method on `class`, following traits, parents and interfaces.
    fn find_method(&self, class: &ClassLike, name: &str) -> Option<Rc<MethodDecl>> {
        if let Some(method) = class.own_method(name) {
            return Some(method.clone());
        }

        let mut visited = BTreeSet::new();
        visited.insert(class.name.clone());
        let mut pending: Vec<ClassName> = class.supertypes().cloned().collect();
        pending.reverse();

        while let Some(next) = pending.pop() {
            if !visited.insert(next.clone()) {
                continue;
            }
            let declarations = self.implementors_of(&next);
            if declarations.is_empty() {
                log::trace!("supertype {next} of {} is not declared", class.name);
            }
            for decl in declarations {
                if let Some(method) = decl.own_method(name) {
                    return Some(method.clone());
                }
                let mut supers: Vec<ClassName> = decl.supertypes().cloned().collect();
                supers.reverse();
                pending.extend(supers);
            }
        }
        None
    }
}

#[derive(Debug, Default, Deserialize)]
struct ClassIndexFile {
    #[serde(default)]
    classes: Vec<ClassLike>,
}

/// In-memory class directory.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes: BTreeMap<ClassName, Vec<Rc<ClassLike>>>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. A name may be declared more than once.
    pub fn add(&mut self, class: ClassLike) {
        self.classes
            .entry(class.name.clone())
            .or_default()
            .push(Rc::new(class));
    }

    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Rc<ClassLike>> {
        match TypeName::new(name) {
            TypeName::Class(name) => self.classes.get(&name).and_then(|d| d.first().cloned()),
            _ => None,
        }
    }

    /// Add every declaration of `other`.
    pub fn merge(&mut self, other: ClassIndex) {
        for (name, declarations) in other.classes {
            self.classes.entry(name).or_default().extend(declarations);
        }
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ClassLike>) -> Self {
        let mut index = Self::new();
        for class in classes {
            index.add(class);
        }
        index
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ClassIndexFile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_classes(file.classes))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ClassIndexFile = serde_json::from_str(json)?;
        Ok(Self::from_classes(file.classes))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => bail!(
                "Unsupported class directory `{}`. Must be json or yaml.",
                path.display()
            ),
        }
    }
}

impl ClassDirectory for ClassIndex {
    fn implementors_of(&self, name: &ClassName) -> Vec<Rc<ClassLike>> {
        self.classes.get(name).cloned().unwrap_or_default()
    }
}
