//! Search index over an extracted model.
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::HashSet;

use bitflags::bitflags;

use crate::{
    javautils::{member_path, render_field_signature, render_method_signature, render_type_header},
    model::{Model, TypeDef, TypeKind, enclosing_of, package_of},
    render::RenderSelection,
};

bitflags! {
    /// Domains that a search query can operate over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SearchDomain: u32 {
        /// Match against item names.
        const NAMES = 1 << 0;
        /// Match against comments.
        const DOCS = 1 << 1;
        /// Match against canonical paths.
        const PATHS = 1 << 2;
        /// Match against rendered declarations.
        const SIGNATURES = 1 << 3;
    }
}

impl Default for SearchDomain {
    fn default() -> Self {
        Self::NAMES | Self::DOCS | Self::SIGNATURES
    }
}

/// Options that control how a model search should be performed.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Raw user query to evaluate.
    pub query: String,
    /// Domains to search across; defaults to [`SearchDomain::default`].
    pub domains: SearchDomain,
    /// Whether matching should respect letter casing.
    pub case_sensitive: bool,
    /// Whether matched types should expand to include all their members and nested types.
    pub expand_containers: bool,
}

impl SearchOptions {
    /// Create a new options struct with the provided query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            domains: SearchDomain::default(),
            case_sensitive: false,
            expand_containers: true,
        }
    }

    /// Ensure the options have at least one domain selected.
    pub fn ensure_domains(&mut self) {
        if self.domains.is_empty() {
            self.domains = SearchDomain::default();
        }
    }
}

/// Classified kind associated with a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchItemKind {
    /// Package.
    Package,
    /// Class.
    Class,
    /// Interface.
    Interface,
    /// Enum.
    Enum,
    /// Annotation interface.
    Annotation,
    /// Field.
    Field,
    /// Constant of an enum.
    EnumConstant,
    /// Constructor.
    Constructor,
    /// Method.
    Method,
    /// Element of an annotation interface.
    AnnotationElement,
}

impl SearchItemKind {
    /// Human-friendly label describing the item kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Field => "field",
            Self::EnumConstant => "enum constant",
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::AnnotationElement => "annotation element",
        }
    }

    /// Whether the kind denotes a type.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Annotation
        )
    }

    fn for_type(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => Self::Class,
            TypeKind::Interface => Self::Interface,
            TypeKind::Enum => Self::Enum,
            TypeKind::Annotation => Self::Annotation,
        }
    }
}

/// Aggregated search response containing matches and rendered output.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Matched records returned by the index.
    pub results: Vec<SearchResult>,
    /// Rendered stubs restricted to the matched items.
    pub rendered: String,
}

/// Lightweight record describing an item for list mode output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Kind classification for the item.
    pub kind: SearchItemKind,
    /// Canonical path of the item.
    pub path: String,
}

/// An indexed item, and the result of a query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Kind of result item.
    pub kind: SearchItemKind,
    /// Canonical path: a package or type name, or `Type#member`.
    pub path_string: String,
    /// Unqualified name.
    pub raw_name: String,
    /// Comment text if available.
    pub docs: Option<String>,
    /// Rendered declaration used for matching and display.
    pub signature: Option<String>,
    /// The type itself, or the type declaring the member; empty for packages.
    pub type_name: String,
    /// Enclosing types that must be rendered for context, outermost first.
    pub ancestors: Vec<String>,
    /// Domains that produced a match (empty when stored in the index).
    pub matched: SearchDomain,
}

/// Index of model items prepared for search queries.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchResult>,
}

impl SearchIndex {
    /// Construct a new index over every package, type and member of `model`.
    pub fn build(model: &Model) -> Self {
        let mut entries = Vec::new();
        for pkg in model.packages.values().filter(|p| !p.name.is_empty()) {
            entries.push(SearchResult {
                kind: SearchItemKind::Package,
                path_string: pkg.name.clone(),
                raw_name: pkg.name.rsplit('.').next().unwrap_or(&pkg.name).to_string(),
                docs: None,
                signature: Some(format!("package {}", pkg.name)),
                type_name: String::new(),
                ancestors: Vec::new(),
                matched: SearchDomain::empty(),
            });
        }
        for ty in model.types.values() {
            index_type(ty, &mut entries);
        }
        Self { entries }
    }

    /// Retrieve the immutable list of indexed entries.
    pub fn entries(&self) -> &[SearchResult] {
        &self.entries
    }

    /// Look up an indexed entry by path.
    pub fn get(&self, path: &str) -> Option<&SearchResult> {
        self.entries.iter().find(|e| e.path_string == path)
    }

    /// Execute a query against the index and return matching results.
    pub fn search(&self, options: &SearchOptions) -> Vec<SearchResult> {
        let mut opts = options.clone();
        opts.ensure_domains();
        let trimmed = opts.query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let normalized_query = if opts.case_sensitive {
            trimmed.to_string()
        } else {
            trimmed.to_lowercase()
        };

        let mut results = Vec::new();
        for entry in &self.entries {
            let mut matched = SearchDomain::empty();
            if opts.domains.contains(SearchDomain::NAMES)
                && contains(&entry.raw_name, &normalized_query, opts.case_sensitive)
            {
                matched |= SearchDomain::NAMES;
            }
            if opts.domains.contains(SearchDomain::DOCS)
                && entry
                    .docs
                    .as_ref()
                    .is_some_and(|docs| contains(docs, &normalized_query, opts.case_sensitive))
            {
                matched |= SearchDomain::DOCS;
            }
            if opts.domains.contains(SearchDomain::PATHS)
                && contains(&entry.path_string, &normalized_query, opts.case_sensitive)
            {
                matched |= SearchDomain::PATHS;
            }
            if opts.domains.contains(SearchDomain::SIGNATURES)
                && entry
                    .signature
                    .as_ref()
                    .is_some_and(|sig| contains(sig, &normalized_query, opts.case_sensitive))
            {
                matched |= SearchDomain::SIGNATURES;
            }

            if !matched.is_empty() {
                let mut clone = entry.clone();
                clone.matched = matched;
                results.push(clone);
            }
        }

        results
    }
}

fn index_type(ty: &TypeDef, entries: &mut Vec<SearchResult>) {
    let ancestors = enclosing_chain(&ty.name);
    entries.push(SearchResult {
        kind: SearchItemKind::for_type(ty.kind),
        path_string: ty.name.clone(),
        raw_name: ty.simple_name().to_string(),
        docs: joined(&ty.comment),
        signature: Some(render_type_header(ty)),
        type_name: ty.name.clone(),
        ancestors: ancestors.clone(),
        matched: SearchDomain::empty(),
    });

    let mut owners = ancestors;
    owners.push(ty.name.clone());
    let mut member = |kind, key: &str, name: &str, comment: &[String], signature: String| {
        entries.push(SearchResult {
            kind,
            path_string: member_path(&ty.name, key),
            raw_name: name.to_string(),
            docs: joined(comment),
            signature: Some(signature),
            type_name: ty.name.clone(),
            ancestors: owners.clone(),
            matched: SearchDomain::empty(),
        });
    };
    for constant in &ty.enum_constants {
        member(
            SearchItemKind::EnumConstant,
            &constant.name,
            &constant.name,
            &constant.comment,
            constant.name.clone(),
        );
    }
    for field in &ty.fields {
        member(
            SearchItemKind::Field,
            &field.name,
            &field.name,
            &field.comment,
            render_field_signature(field),
        );
    }
    for ctor in &ty.constructors {
        member(
            SearchItemKind::Constructor,
            &ctor.key(),
            &ctor.name,
            &ctor.comment,
            render_method_signature(ctor),
        );
    }
    let method_kind = if ty.kind == TypeKind::Annotation {
        SearchItemKind::AnnotationElement
    } else {
        SearchItemKind::Method
    };
    for method in &ty.methods {
        member(
            method_kind,
            &method.key(),
            &method.name,
            &method.comment,
            render_method_signature(method),
        );
    }
}

/// Enclosing types of `name`, outermost first.
fn enclosing_chain(name: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = name;
    while let Some(outer) = enclosing_of(current) {
        chain.push(outer.to_string());
        current = outer;
    }
    chain.reverse();
    chain
}

fn joined(comment: &[String]) -> Option<String> {
    if comment.is_empty() {
        None
    } else {
        Some(comment.join("\n"))
    }
}

fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if needle.is_empty() {
        return false;
    }
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(needle)
    }
}

/// Build a renderer selection covering matches, their enclosing types, and optionally the full
/// contents of matched types and packages.
pub fn build_render_selection(
    index: &SearchIndex,
    results: &[SearchResult],
    expand_containers: bool,
) -> RenderSelection {
    let mut matches = HashSet::new();
    let mut context = HashSet::new();
    let mut expanded = HashSet::new();
    for result in results {
        matches.insert(result.path_string.clone());
        context.extend(result.ancestors.iter().cloned());
        if result.kind.is_type() {
            context.insert(result.type_name.clone());
        }
    }
    if expand_containers {
        let types: HashSet<&str> = results
            .iter()
            .filter(|r| r.kind.is_type())
            .map(|r| r.type_name.as_str())
            .collect();
        let packages: HashSet<&str> = results
            .iter()
            .filter(|r| r.kind == SearchItemKind::Package)
            .map(|r| r.path_string.as_str())
            .collect();
        for entry in index.entries().iter().filter(|e| e.kind.is_type()) {
            let inside_type = types.contains(entry.type_name.as_str())
                || entry.ancestors.iter().any(|a| types.contains(a.as_str()));
            let inside_package = packages.contains(package_of(&entry.type_name));
            if inside_type || inside_package {
                context.insert(entry.type_name.clone());
                context.extend(entry.ancestors.iter().cloned());
                expanded.insert(entry.type_name.clone());
            }
        }
    }

    RenderSelection::new(matches, context, expanded)
}

/// Format the set of matched domains into human-friendly labels.
pub fn describe_domains(domains: SearchDomain) -> Vec<&'static str> {
    let mut labels = Vec::new();
    if domains.contains(SearchDomain::NAMES) {
        labels.push("name");
    }
    if domains.contains(SearchDomain::DOCS) {
        labels.push("doc");
    }
    if domains.contains(SearchDomain::PATHS) {
        labels.push("path");
    }
    if domains.contains(SearchDomain::SIGNATURES) {
        labels.push("signature");
    }
    labels
}
