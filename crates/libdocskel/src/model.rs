//! The version-independent API model built from a documentation tree.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
};

use bitflags::bitflags;
use serde::Serialize;
use tracing::debug;

use crate::{
    keywords::ROOT_OBJECT,
    report::{Report, Warning},
};

bitflags! {
    /// Declaration modifiers of a type or member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct Modifiers: u16 {
        /// `public`
        const PUBLIC = 1 << 0;
        /// `protected`
        const PROTECTED = 1 << 1;
        /// `private`
        const PRIVATE = 1 << 2;
        /// `abstract`
        const ABSTRACT = 1 << 3;
        /// `default` (interface methods)
        const DEFAULT = 1 << 4;
        /// `static`
        const STATIC = 1 << 5;
        /// `final`
        const FINAL = 1 << 6;
        /// `transient`
        const TRANSIENT = 1 << 7;
        /// `volatile`
        const VOLATILE = 1 << 8;
        /// `synchronized`
        const SYNCHRONIZED = 1 << 9;
        /// `native`
        const NATIVE = 1 << 10;
        /// `strictfp`
        const STRICTFP = 1 << 11;
        /// `sealed`
        const SEALED = 1 << 12;
        /// `non-sealed`
        const NON_SEALED = 1 << 13;
    }
}

/// Keywords in declaration order.
const MODIFIER_KEYWORDS: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::STRICTFP, "strictfp"),
    (Modifiers::SEALED, "sealed"),
    (Modifiers::NON_SEALED, "non-sealed"),
];

impl Modifiers {
    /// The flag for a single modifier keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        MODIFIER_KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == word)
            .map(|(flag, _)| *flag)
    }

    /// Collect every modifier keyword among `words`, ignoring anything else.
    pub fn parse<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .filter_map(Self::from_keyword)
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    /// The set keywords, in declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        MODIFIER_KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
            .collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keywords().join(" "))
    }
}

/// What kind of type a page documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A class (the default when a page gives no better hint).
    #[default]
    Class,
    /// An interface.
    Interface,
    /// An enum.
    Enum,
    /// An annotation interface.
    Annotation,
}

impl TypeKind {
    /// Keyword introducing a declaration of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
        }
    }

    /// Human-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
        }
    }

    /// Whether the type declares its supertypes with `extends` only.
    pub fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// How far extraction has progressed for a type. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Named by the index.
    Discovered,
    /// Present in the model with no content.
    #[default]
    Stubbed,
    /// Kind, declaration and member summaries read.
    Summarized,
    /// Member details and comments read.
    Detailed,
    /// Attached to its package and enclosing type.
    Linked,
}

/// A use of a type: canonical name plus array and generic decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TypeRef {
    /// Canonical name, a primitive, or a type variable.
    pub name: String,
    /// Array dimensions, not counting varargs.
    pub dims: usize,
    /// Generic arguments including the angle brackets, with canonical names inside.
    pub generics: Option<String>,
    /// Whether this is the trailing `...` parameter.
    pub varargs: bool,
}

impl TypeRef {
    /// A plain reference to `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The erased form used to tell overloads apart: name plus one `[]` per dimension.
    pub fn erasure(&self) -> String {
        let dims = self.dims + usize::from(self.varargs);
        format!("{}{}", self.name, "[]".repeat(dims))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(generics) = &self.generics {
            f.write_str(generics)?;
        }
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        if self.varargs {
            f.write_str("...")?;
        }
        Ok(())
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Declared name; synthesized as `argN` when the page omits it.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
}

/// A compile-time constant value as documented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstValue {
    /// String literal, unescaped.
    Str(String),
    /// `true`/`false`.
    Bool(bool),
    /// Any integral type.
    Int(i64),
    /// `float` or `double`.
    Float(f64),
    /// `char`, as a code point.
    Char(u32),
    /// Text kept verbatim because it did not parse.
    Raw(String),
    /// No usable value.
    Null,
}

/// A field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Declared type.
    pub ty: TypeRef,
    /// Comment lines.
    pub comment: Vec<String>,
    /// Documented constant value.
    pub constant: Option<ConstValue>,
}

/// An enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConst {
    /// Constant name.
    pub name: String,
    /// Modifiers from the detail block (normally `public static final`).
    pub modifiers: Modifiers,
    /// Comment lines.
    pub comment: Vec<String>,
}

/// A method, constructor or annotation element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Method {
    /// Member name; the simple type name for constructors.
    pub name: String,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Method type parameters, e.g. `<T extends Comparable<T>>`.
    pub type_params: Option<String>,
    /// Ordered parameters.
    pub params: Vec<Param>,
    /// Return type; `None` for constructors.
    pub returns: Option<TypeRef>,
    /// Declared checked exceptions.
    pub throws: Vec<TypeRef>,
    /// Comment lines, including `@param`/`@return`/`@throws` tags.
    pub comment: Vec<String>,
    /// Default value of an annotation element, as written.
    pub default_value: Option<String>,
    /// Whether this annotation element is optional.
    pub optional: bool,
}

impl Method {
    /// Erased parameter types.
    pub fn param_erasures(&self) -> Vec<String> {
        self.params.iter().map(|p| p.ty.erasure()).collect()
    }

    /// Overload key such as `m(int,java.lang.String[])`.
    pub fn key(&self) -> String {
        format!("{}({})", self.name, self.param_erasures().join(","))
    }

    /// Whether `self` and `other` denote the same member.
    pub fn same_member(&self, other: &Self) -> bool {
        self.name == other.name && self.param_erasures() == other.param_erasures()
    }
}

/// A documented type.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TypeDef {
    /// Canonical name, e.g. `a.b.C$D`.
    pub name: String,
    /// Owning package.
    pub package: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Type parameter clause, e.g. `<K, V>`.
    pub type_params: Option<String>,
    /// Superclass.
    pub supertype: Option<TypeRef>,
    /// Implemented (or, for interfaces, extended) interfaces in declaration order.
    pub interfaces: Vec<TypeRef>,
    /// Fields.
    pub fields: Vec<Field>,
    /// Enum constants.
    pub enum_constants: Vec<EnumConst>,
    /// Methods and annotation elements.
    pub methods: Vec<Method>,
    /// Constructors.
    pub constructors: Vec<Method>,
    /// Canonical names of directly nested types.
    pub nested: Vec<String>,
    /// Comment lines.
    pub comment: Vec<String>,
    /// Extraction progress.
    pub stage: Stage,
}

impl TypeDef {
    /// A stub for `name` carrying only naming information.
    pub fn stub(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package: package_of(&name).to_string(),
            name,
            ..Self::default()
        }
    }

    /// Name without package or enclosing types.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Canonical name of the enclosing type, if nested.
    pub fn enclosing(&self) -> Option<&str> {
        enclosing_of(&self.name)
    }

    /// Whether this type is nested in another.
    pub fn is_nested(&self) -> bool {
        self.enclosing().is_some()
    }

    /// Type parameter names declared by the type.
    pub fn type_param_names(&self) -> Vec<String> {
        self.type_params
            .as_deref()
            .map(crate::tokenizer::type_parameter_names)
            .unwrap_or_default()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up methods by name.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }
}

/// A package node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Package {
    /// Dotted name; empty for the root package.
    pub name: String,
    /// Parent package name; `None` only for the root.
    pub parent: Option<String>,
    /// Top-level types directly in this package.
    pub types: BTreeSet<String>,
    /// Direct child packages.
    pub children: BTreeSet<String>,
}

/// Packages and types of a documentation tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Model {
    /// Types by canonical name.
    pub types: BTreeMap<String, TypeDef>,
    /// Packages by name, populated by [`Model::link`].
    pub packages: BTreeMap<String, Package>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a stub exists for `name`.
    pub fn stub(&mut self, name: &str) -> &mut TypeDef {
        self.types
            .entry(name.to_string())
            .or_insert_with(|| TypeDef::stub(name))
    }

    /// Look up a type.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Look up a type mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDef> {
        self.types.get_mut(name)
    }

    /// Replace a type with an updated copy; stages never move backwards.
    pub fn commit(&mut self, ty: TypeDef) {
        match self.types.get_mut(&ty.name) {
            Some(existing) if existing.stage > ty.stage => {}
            Some(existing) => *existing = ty,
            None => {
                self.types.insert(ty.name.clone(), ty);
            }
        }
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the model has no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a package.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Types not nested in another, in name order.
    pub fn top_level_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values().filter(|t| !t.is_nested())
    }

    /// Connect the model: enclosing types, default supertypes, cycle removal, package tree.
    pub fn link(&mut self, report: &mut Report) {
        self.stub_enclosing_types();
        self.attach_nested_types();
        self.default_supertypes();
        self.break_supertype_cycles(report);
        self.build_packages();
        for ty in self.types.values_mut() {
            if ty.stage == Stage::Detailed {
                ty.stage = Stage::Linked;
            }
        }
        debug!(
            types = self.types.len(),
            packages = self.packages.len(),
            "linked model"
        );
    }

    fn stub_enclosing_types(&mut self) {
        loop {
            let missing: Vec<String> = self
                .types
                .keys()
                .filter_map(|name| enclosing_of(name))
                .filter(|outer| !self.types.contains_key(*outer))
                .map(str::to_string)
                .collect();
            if missing.is_empty() {
                break;
            }
            for outer in missing {
                debug!("creating enclosing stub {outer}");
                self.stub(&outer);
            }
        }
    }

    fn attach_nested_types(&mut self) {
        let pairs: Vec<(String, String)> = self
            .types
            .keys()
            .filter_map(|name| enclosing_of(name).map(|outer| (outer.to_string(), name.clone())))
            .collect();
        for (outer, inner) in pairs {
            if let Some(ty) = self.types.get_mut(&outer)
                && !ty.nested.contains(&inner)
            {
                ty.nested.push(inner);
            }
        }
    }

    fn default_supertypes(&mut self) {
        for ty in self.types.values_mut() {
            if ty.name == ROOT_OBJECT || ty.kind.is_interface_like() {
                ty.supertype = None;
            } else if ty.supertype.is_none() {
                ty.supertype = Some(TypeRef::named(ROOT_OBJECT));
            }
        }
    }

    fn break_supertype_cycles(&mut self, report: &mut Report) {
        let names: Vec<String> = self.types.keys().cloned().collect();
        for start in names {
            let mut seen = HashSet::new();
            let mut current = start.clone();
            while let Some(next) = self
                .types
                .get(&current)
                .and_then(|t| t.supertype.as_ref())
                .map(|s| s.name.clone())
            {
                if next == start {
                    if let Some(ty) = self.types.get_mut(&start) {
                        ty.supertype = Some(TypeRef::named(ROOT_OBJECT));
                    }
                    report.warn(Warning::SupertypeCycle {
                        type_name: start.clone(),
                    });
                    break;
                }
                if !seen.insert(next.clone()) {
                    break;
                }
                current = next;
            }
        }
    }

    fn build_packages(&mut self) {
        self.packages.clear();
        self.ensure_package("");
        let top_level: Vec<(String, String)> = self
            .top_level_types()
            .map(|t| (t.package.clone(), t.name.clone()))
            .collect();
        for (package, name) in top_level {
            self.ensure_package(&package);
            if let Some(pkg) = self.packages.get_mut(&package) {
                pkg.types.insert(name);
            }
        }
    }

    fn ensure_package(&mut self, name: &str) {
        if self.packages.contains_key(name) {
            return;
        }
        let parent = parent_package(name);
        if let Some(parent) = parent {
            self.ensure_package(parent);
            if let Some(pkg) = self.packages.get_mut(parent) {
                pkg.children.insert(name.to_string());
            }
        }
        self.packages.insert(
            name.to_string(),
            Package {
                name: name.to_string(),
                parent: parent.map(str::to_string),
                ..Package::default()
            },
        );
    }

    /// Structural problems in a linked model; empty when every invariant holds.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for pkg in self.packages.values() {
            if parent_package(&pkg.name) != pkg.parent.as_deref() {
                problems.push(format!("package {:?} has parent {:?}", pkg.name, pkg.parent));
            }
            if let Some(parent) = &pkg.parent
                && !self.packages.contains_key(parent)
            {
                problems.push(format!("package {:?} has no parent node", pkg.name));
            }
        }
        for ty in self.types.values() {
            if let Some(outer) = ty.enclosing() {
                match self.types.get(outer) {
                    Some(o) if o.nested.contains(&ty.name) => {}
                    Some(_) => problems.push(format!("{} is not listed in {outer}", ty.name)),
                    None => problems.push(format!("{} has no enclosing type", ty.name)),
                }
            }
            let needs_super = ty.name != ROOT_OBJECT && !ty.kind.is_interface_like();
            if needs_super && ty.supertype.is_none() {
                problems.push(format!("{} has no supertype", ty.name));
            }
            let mut seen = HashSet::new();
            let mut current = ty;
            while let Some(next) = current
                .supertype
                .as_ref()
                .and_then(|s| self.types.get(&s.name))
            {
                if next.name == ty.name || !seen.insert(next.name.as_str()) {
                    problems.push(format!("supertype cycle through {}", ty.name));
                    break;
                }
                current = next;
            }
        }
        problems
    }
}

/// Package part of a canonical type name.
pub fn package_of(name: &str) -> &str {
    let top = name.split('$').next().unwrap_or(name);
    top.rsplit_once('.').map_or("", |(pkg, _)| pkg)
}

/// Simple name of a canonical type name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit(['.', '$']).next().unwrap_or(name)
}

/// Enclosing type of a nested canonical name.
pub fn enclosing_of(name: &str) -> Option<&str> {
    name.rsplit_once('$').map(|(outer, _)| outer)
}

/// Parent of a package; `None` for the root.
pub fn parent_package(name: &str) -> Option<&str> {
    if name.is_empty() {
        None
    } else {
        Some(name.rsplit_once('.').map_or("", |(parent, _)| parent))
    }
}
