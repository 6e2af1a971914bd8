//! Qualification of type names as they are written in documentation text.

use std::collections::HashSet;

use crate::{
    keywords::{DEFAULT_IMPORT_PACKAGE, PRIMITIVES, is_implicit_type},
    tokenizer::strip_generics,
};

/// The declaration context a name is read in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosing {
    /// Package of the type whose page is being read.
    pub package: String,
    /// Type variables in scope: the type's own, plus those of the member being read.
    pub type_params: Vec<String>,
}

impl Enclosing {
    /// A scope for `package` with no type variables.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_params: Vec::new(),
        }
    }

    /// This scope extended with additional type variables.
    pub fn with_type_params<I>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut scope = self.clone();
        scope.type_params.extend(params);
        scope
    }
}

/// Outcome of qualifying a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Already a registered canonical name (or a primitive).
    Known(String),
    /// Written fully qualified; registered as-is.
    Qualified(String),
    /// A type variable of the enclosing scope.
    TypeVariable(String),
    /// Found in the enclosing package.
    SamePackage(String),
    /// Found by the implicit-import or nested-suffix guess.
    Guessed(String),
    /// Nothing matched; the name is returned as written.
    Unresolved(String),
}

impl Resolution {
    /// The resulting name.
    pub fn name(&self) -> &str {
        match self {
            Self::Known(n)
            | Self::Qualified(n)
            | Self::TypeVariable(n)
            | Self::SamePackage(n)
            | Self::Guessed(n)
            | Self::Unresolved(n) => n,
        }
    }

    /// Consume the resolution, returning the resulting name.
    pub fn into_name(self) -> String {
        match self {
            Self::Known(n)
            | Self::Qualified(n)
            | Self::TypeVariable(n)
            | Self::SamePackage(n)
            | Self::Guessed(n)
            | Self::Unresolved(n) => n,
        }
    }

    /// Whether resolution fell through every strategy.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// Table of canonical type names with the lookup rules used to qualify short names.
#[derive(Debug, Clone)]
pub struct NameResolver {
    /// Every canonical name known so far, plus the primitives.
    known: HashSet<String>,
    /// Registered names in registration order; drives the nested-suffix guess.
    order: Vec<String>,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver {
    /// Create a table that knows only the primitive types.
    pub fn new() -> Self {
        Self {
            known: PRIMITIVES.iter().map(|p| p.to_string()).collect(),
            order: Vec::new(),
        }
    }

    /// Register a canonical name.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.known.insert(name.clone()) {
            self.order.push(name);
        }
    }

    /// Whether `name` is a registered canonical name or a primitive.
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Number of registered (non-primitive) names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no names have been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Qualify `written` as read inside `enclosing`.
    pub fn to_canonical(&mut self, written: &str, enclosing: &Enclosing) -> Resolution {
        let name = strip_generics(written).trim();

        if self.known.contains(name) {
            return Resolution::Known(name.to_string());
        }
        if name.contains('.') {
            self.add(name);
            return Resolution::Qualified(name.to_string());
        }
        if enclosing.type_params.iter().any(|p| p == name) {
            return Resolution::TypeVariable(name.to_string());
        }
        let local = qualify(&enclosing.package, name);
        if self.known.contains(&local) {
            return Resolution::SamePackage(local);
        }
        if let Some(guess) = self.guess(name) {
            self.add(guess.clone());
            return Resolution::Guessed(guess);
        }
        Resolution::Unresolved(name.to_string())
    }

    /// Implicit-import package first, then the first registered `Outer$name`.
    fn guess(&self, name: &str) -> Option<String> {
        let implicit = qualify(DEFAULT_IMPORT_PACKAGE, name);
        if self.known.contains(&implicit) || is_implicit_type(name) {
            return Some(implicit);
        }
        let suffix = format!("${name}");
        self.order.iter().find(|n| n.ends_with(&suffix)).cloned()
    }
}

/// `package.name`, or just `name` in the default package.
fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
