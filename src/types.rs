// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Semantic type names as reported by the type oracle.
//!
//! A [`TypeName`] is either one of the closed set of built-in kinds, a
//! class-like name (namespace qualified, leading `\`), or some other
//! unqualified name the oracle produced. A [`TypeSet`] is the set of names an
//! expression may statically evaluate to.

use crate::Rc;

use core::fmt;
use core::hash::{Hash, Hasher};
use indexmap::IndexSet;
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinType {
    Integer,
    Float,
    String,
    Boolean,
    Array,
    Null,
    Callable,
    Mixed,
    Object,
    Void,
    Resource,
    Iterable,
    /// The empty set of types. Produced for expressions that never yield.
    Never,
}

lazy_static! {
    static ref BUILTIN_ALIASES: BTreeMap<&'static str, BuiltinType> = {
        let mut m = BTreeMap::new();
        m.insert("int", BuiltinType::Integer);
        m.insert("integer", BuiltinType::Integer);
        m.insert("float", BuiltinType::Float);
        m.insert("double", BuiltinType::Float);
        m.insert("real", BuiltinType::Float);
        m.insert("string", BuiltinType::String);
        m.insert("bool", BuiltinType::Boolean);
        m.insert("boolean", BuiltinType::Boolean);
        m.insert("false", BuiltinType::Boolean);
        m.insert("true", BuiltinType::Boolean);
        m.insert("array", BuiltinType::Array);
        m.insert("null", BuiltinType::Null);
        m.insert("callable", BuiltinType::Callable);
        m.insert("mixed", BuiltinType::Mixed);
        m.insert("object", BuiltinType::Object);
        m.insert("void", BuiltinType::Void);
        m.insert("resource", BuiltinType::Resource);
        m.insert("iterable", BuiltinType::Iterable);
        m.insert("never", BuiltinType::Never);
        m.insert("empty", BuiltinType::Never);
        m
    };
}

impl BuiltinType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Integer => "integer",
            BuiltinType::Float => "float",
            BuiltinType::String => "string",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Array => "array",
            BuiltinType::Null => "null",
            BuiltinType::Callable => "callable",
            BuiltinType::Mixed => "mixed",
            BuiltinType::Object => "object",
            BuiltinType::Void => "void",
            BuiltinType::Resource => "resource",
            BuiltinType::Iterable => "iterable",
            BuiltinType::Never => "never",
        }
    }

    /// Look up a built-in kind by any of its spellings. Case-insensitive.
    pub fn lookup(name: &str) -> Option<BuiltinType> {
        BUILTIN_ALIASES
            .get(name.to_ascii_lowercase().as_str())
            .copied()
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace-qualified class, interface or trait name.
///
/// Class names are case-insensitive; the declared spelling is kept for display.
#[derive(Clone)]
pub struct ClassName {
    name: Rc<str>,
}

impl ClassName {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    fn key(&self) -> impl Iterator<Item = u8> + '_ {
        self.name.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for ClassName {}

impl Hash for ClassName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.key() {
            state.write_u8(b);
        }
    }
}

impl PartialOrd for ClassName {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassName {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.key().cmp(other.key())
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for ClassName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if !name.starts_with('\\') || name.len() < 2 {
            return Err(serde::de::Error::custom(format!(
                "class name `{name}` must be fully qualified with a leading `\\`"
            )));
        }
        Ok(ClassName::new(&name))
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Builtin(BuiltinType),
    Class(ClassName),
    /// An unqualified name outside the built-in vocabulary (`self`, `static`, ...).
    Other(Rc<str>),
}

impl TypeName {
    /// Classify a raw type name.
    ///
    /// Built-in kinds written with a leading namespace separator (`\array`)
    /// are folded back to the built-in.
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        match name.strip_prefix('\\') {
            Some(rest) if !rest.contains('\\') => match BuiltinType::lookup(rest) {
                Some(builtin) => TypeName::Builtin(builtin),
                None => TypeName::Class(ClassName::new(name)),
            },
            Some(_) => TypeName::Class(ClassName::new(name)),
            None => match BuiltinType::lookup(name) {
                Some(builtin) => TypeName::Builtin(builtin),
                None => TypeName::Other(name.into()),
            },
        }
    }

    pub fn is_builtin(&self, builtin: BuiltinType) -> bool {
        matches!(self, TypeName::Builtin(b) if *b == builtin)
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self, TypeName::Class(_))
    }

    pub fn as_class(&self) -> Option<&ClassName> {
        match self {
            TypeName::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl From<BuiltinType> for TypeName {
    fn from(builtin: BuiltinType) -> Self {
        TypeName::Builtin(builtin)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::new(name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Builtin(b) => f.write_str(b.as_str()),
            TypeName::Class(c) => f.write_str(c.as_str()),
            TypeName::Other(o) => f.write_str(o),
        }
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name.trim().is_empty() {
            return Err(serde::de::Error::custom("type name must not be empty"));
        }
        Ok(TypeName::new(&name))
    }
}

/// Set of types an expression may statically be.
///
/// Iteration follows insertion order so diagnostics render deterministically.
/// Equality ignores order.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<TypeName>")]
pub struct TypeSet {
    types: IndexSet<TypeName>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        types.into_iter().map(Into::into).collect()
    }

    pub fn insert(&mut self, ty: impl Into<TypeName>) -> bool {
        self.types.insert(ty.into())
    }

    pub fn remove(&mut self, ty: &TypeName) -> bool {
        self.types.shift_remove(ty)
    }

    pub fn contains(&self, ty: &TypeName) -> bool {
        self.types.contains(ty)
    }

    pub fn contains_builtin(&self, builtin: BuiltinType) -> bool {
        self.types.contains(&TypeName::Builtin(builtin))
    }

    /// True when the set holds exactly the given built-ins and nothing else.
    pub fn is_exactly(&self, builtins: &[BuiltinType]) -> bool {
        self.types.len() == builtins.len() && builtins.iter().all(|b| self.contains_builtin(*b))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.types.iter()
    }
}

impl From<Vec<TypeName>> for TypeSet {
    fn from(types: Vec<TypeName>) -> Self {
        types.into_iter().collect()
    }
}

impl FromIterator<TypeName> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeName>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl Extend<TypeName> for TypeSet {
    fn extend<I: IntoIterator<Item = TypeName>>(&mut self, iter: I) {
        self.types.extend(iter)
    }
}

impl IntoIterator for TypeSet {
    type Item = TypeName;
    type IntoIter = indexmap::set::IntoIter<TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

impl<'a> IntoIterator for &'a TypeSet {
    type Item = &'a TypeName;
    type IntoIter = indexmap::set::Iter<'a, TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, ty) in self.types.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(ty, f)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
