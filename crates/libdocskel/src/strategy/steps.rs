//! Extraction steps shared by every format. They reach the page only through [`Behaviors`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{ElementRef, Node};
use tracing::debug;

use super::{Behaviors, DetailBlock, Section, SummaryRow};
use crate::{
    error::{DocskelError, Result},
    html::{self, Fragment, Page},
    links::{LinkResolver, is_type_name},
    model::{EnumConst, Field, Method, Modifiers, Param, Stage, TypeDef, TypeKind, TypeRef},
    names::{Enclosing, NameResolver},
    report::{Report, Warning},
    tokenizer,
};

/// Matches an annotation use, with or without arguments.
static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@[\w.$]+(\s*\([^)]*\))?").expect("annotation pattern must compile")
});

/// Remove annotation uses from `text`, keeping the `@interface` keyword.
pub fn strip_annotations(text: &str) -> String {
    let stripped = ANNOTATION.replace_all(text, |caps: &Captures<'_>| {
        if &caps[0] == "@interface" {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    html::normalize(&stripped)
}

/// Shared state for extracting one type.
pub struct Context<'r> {
    /// Canonical names known to the run.
    pub names: &'r mut NameResolver,
    /// Link reduction rules.
    pub links: &'r LinkResolver,
    /// Warning sink.
    pub report: &'r mut Report,
    /// Directory of the page being read, relative to the root.
    pub page_dir: String,
    /// Type being extracted, for warning context.
    pub type_name: String,
    /// Type variables declared by the enclosing types of a nested type.
    pub outer_type_params: Vec<String>,
}

impl<'r> Context<'r> {
    /// Create a context for extracting `type_name` from a page in `page_dir`.
    pub fn new(
        names: &'r mut NameResolver,
        links: &'r LinkResolver,
        report: &'r mut Report,
        type_name: impl Into<String>,
        page_dir: impl Into<String>,
    ) -> Self {
        Self {
            names,
            links,
            report,
            page_dir: page_dir.into(),
            type_name: type_name.into(),
            outer_type_params: Vec::new(),
        }
    }

    /// This context with the type variables of the enclosing types in scope.
    pub fn with_outer_type_params(mut self, params: Vec<String>) -> Self {
        self.outer_type_params = params;
        self
    }

    /// Text of `fragments` with every type link replaced by its canonical target.
    pub fn resolved_text(&mut self, fragments: &[Fragment]) -> String {
        let mut out = String::new();
        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => out.push_str(text),
                Fragment::Link { href, text } => out.push_str(&self.link_text(href, text)),
            }
        }
        html::normalize(&out)
    }

    fn link_text(&mut self, href: &str, text: &str) -> String {
        if href.starts_with('#') {
            return text.to_string();
        }
        match self.links.resolve_from(&self.page_dir, href) {
            Ok(name) if is_type_name(&name) => {
                let name = tokenizer::strip_generics(&name);
                let trailing = text.find('<').map_or("", |idx| &text[idx..]);
                if text.trim_start().starts_with('@') {
                    format!("@{name}{trailing}")
                } else {
                    format!("{name}{trailing}")
                }
            }
            Ok(_) => text.to_string(),
            Err(_) => {
                self.report.warn(Warning::UnresolvedLink {
                    link: href.to_string(),
                    context: self.type_name.clone(),
                });
                text.to_string()
            }
        }
    }

    /// Qualify a written type name, warning when it cannot be resolved.
    pub fn canonical(&mut self, written: &str, scope: &Enclosing) -> String {
        let resolution = self.names.to_canonical(written, scope);
        if resolution.is_unresolved() {
            self.report.warn(Warning::NameResolutionFallback {
                name: resolution.name().to_string(),
                context: self.type_name.clone(),
            });
        }
        resolution.into_name()
    }

    /// Resolve a written type such as `Map<K, List<V>>[]` or `String...`.
    pub fn resolve_type(&mut self, written: &str, scope: &Enclosing) -> TypeRef {
        let mut text = written.trim();
        let varargs = match text.strip_suffix("...") {
            Some(rest) => {
                text = rest.trim_end();
                true
            }
            None => false,
        };
        let mut dims = 0;
        while let Some(rest) = text.strip_suffix("[]") {
            text = rest.trim_end();
            dims += 1;
        }
        let (base, generics) = match tokenizer::generic_span(text) {
            Some((start, end)) => (
                &text[..start],
                Some(self.resolve_type_args(&text[start..end], scope)),
            ),
            None => (text, None),
        };
        TypeRef {
            name: self.canonical(base, scope),
            dims,
            generics,
            varargs,
        }
    }

    /// Resolve every name in a type argument list such as `<? extends K, List<V>>`.
    fn resolve_type_args(&mut self, args: &str, scope: &Enclosing) -> String {
        let inner = args
            .trim()
            .strip_prefix('<')
            .and_then(|a| a.strip_suffix('>'))
            .unwrap_or(args);
        let resolved: Vec<String> = tokenizer::split(inner, ",")
            .iter()
            .map(|arg| {
                let arg = arg.trim();
                if arg == "?" {
                    return arg.to_string();
                }
                for bound in ["? extends ", "? super "] {
                    if let Some(rest) = arg.strip_prefix(bound) {
                        return format!("{bound}{}", self.resolve_type(rest, scope));
                    }
                }
                self.resolve_type(arg, scope).to_string()
            })
            .collect();
        format!("<{}>", resolved.join(", "))
    }

    /// Resolve the bounds in a type parameter clause such as `<T extends Comparable<T>>`.
    pub fn resolve_type_params(&mut self, clause: &str, scope: &Enclosing) -> String {
        let inner = clause
            .trim()
            .strip_prefix('<')
            .and_then(|c| c.strip_suffix('>'))
            .unwrap_or(clause);
        let params: Vec<String> = tokenizer::split(inner, ",")
            .iter()
            .map(|param| {
                let param = param.trim();
                match param.split_once(" extends ") {
                    Some((var, bounds)) => {
                        let bounds: Vec<String> = bounds
                            .split('&')
                            .map(|b| self.resolve_type(b, scope).to_string())
                            .collect();
                        format!("{} extends {}", var.trim(), bounds.join(" & "))
                    }
                    None => param.to_string(),
                }
            })
            .collect();
        format!("<{}>", params.join(", "))
    }
}

/// A member signature split into its parts, before name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Modifier keywords.
    pub modifiers: Modifiers,
    /// Type parameter clause.
    pub type_params: Option<String>,
    /// Return or field type as written.
    pub returns: Option<String>,
    /// Member name.
    pub name: String,
    /// Parameters as `(type, name)`; `None` for fields.
    pub params: Option<Vec<(String, Option<String>)>>,
    /// Thrown types as written.
    pub throws: Vec<String>,
}

/// Split a link-resolved member signature.
pub fn parse_signature(text: &str) -> Option<Signature> {
    let text = strip_annotations(text);
    let Some((start, end)) = tokenizer::paren_span(&text) else {
        let words = tokenizer::words(&text);
        let (name, head) = words.split_last()?;
        let mut sig = head_parts(head);
        sig.name = name.clone();
        return Some(sig);
    };
    let words = tokenizer::words(&text[..start - 1]);
    let (name, head) = words.split_last()?;
    let mut sig = head_parts(head);
    sig.name = name.clone();
    sig.params = Some(parse_params(&text[start..end]));
    let tail = tokenizer::words(&text[end + 1..]);
    if let Some(idx) = tail.iter().position(|w| w == "throws") {
        sig.throws = tokenizer::list(&tail[idx + 1..].join(" "));
    }
    Some(sig)
}

/// Modifiers, type parameters and type from the words before a member name.
fn head_parts(head: &[String]) -> Signature {
    let mut sig = Signature::default();
    for word in head {
        if let Some(flag) = Modifiers::from_keyword(word) {
            sig.modifiers |= flag;
        } else if word.starts_with('<') {
            sig.type_params = Some(word.clone());
        } else if !word.starts_with('@') {
            sig.returns = Some(word.clone());
        }
    }
    sig
}

/// Split a parameter list into `(type, name)` pairs.
pub fn parse_params(list: &str) -> Vec<(String, Option<String>)> {
    let list = strip_annotations(list);
    tokenizer::split(&list, ",")
        .iter()
        .filter_map(|param| {
            let words: Vec<String> = tokenizer::words(param)
                .into_iter()
                .filter(|w| w != "final")
                .collect();
            match words.as_slice() {
                [] => None,
                [ty] => Some((ty.clone(), None)),
                [.., ty, name] => Some((ty.clone(), Some(name.clone()))),
            }
        })
        .collect()
}

/// The enclosing scope of `ty`: its own type variables, then those of its enclosing types.
pub fn type_scope(ty: &TypeDef, outer: &[String]) -> Enclosing {
    Enclosing::new(ty.package.clone())
        .with_type_params(ty.type_param_names().into_iter().chain(outer.iter().cloned()))
}

/// Read kind, declaration and member summaries into `ty`.
pub fn summarize(
    behaviors: &Behaviors,
    page: &Page,
    ty: &mut TypeDef,
    cx: &mut Context<'_>,
) -> Result<()> {
    ty.kind = (behaviors.classify)(page)
        .ok_or_else(|| DocskelError::Extraction(format!("no type header on page of {}", ty.name)))?;
    let declaration = (behaviors.declaration)(page)
        .ok_or_else(|| DocskelError::Extraction(format!("no declaration for {}", ty.name)))?;
    let text = cx.resolved_text(&html::fragments(declaration));
    apply_declaration(&text, ty, cx)?;

    for section in Section::ALL.into_iter().filter(|s| s.is_summary()) {
        let Some(region) = (behaviors.section)(page, section) else {
            continue;
        };
        for row in (behaviors.summary_rows)(&region) {
            add_summary_member(section, &row, ty, cx);
        }
    }
    debug!(
        "summarized {}: {} fields, {} methods, {} constructors",
        ty.name,
        ty.fields.len(),
        ty.methods.len(),
        ty.constructors.len()
    );
    ty.stage = Stage::Summarized;
    Ok(())
}

/// Fill modifiers, type parameters, supertype and interfaces from the declaration text.
pub fn apply_declaration(text: &str, ty: &mut TypeDef, cx: &mut Context<'_>) -> Result<()> {
    let words = tokenizer::words(&strip_annotations(text));
    let simple = ty.simple_name().to_string();
    let dotted = format!(".{simple}");
    let names_type = |w: &String| {
        let bare = tokenizer::strip_generics(w);
        bare == simple || bare.ends_with(&dotted)
    };
    let keyword = ty.kind.keyword();
    let index = words
        .iter()
        .position(names_type)
        .or_else(|| words.iter().position(|w| w == keyword).map(|i| i + 1))
        .filter(|i| *i < words.len())
        .ok_or_else(|| DocskelError::Extraction(format!("declaration does not name {}", ty.name)))?;

    ty.modifiers = Modifiers::parse(words[..index].iter().map(String::as_str));
    let mut rest = index + 1;
    let generics = match tokenizer::generic_span(&words[index]) {
        Some((start, end)) => Some(words[index][start..end].to_string()),
        None => match words.get(rest) {
            Some(next) if next.starts_with('<') => {
                rest += 1;
                Some(next.clone())
            }
            _ => None,
        },
    };
    if let Some(clause) = generics {
        let names = tokenizer::type_parameter_names(&clause);
        let scope = Enclosing::new(ty.package.clone())
            .with_type_params(names.into_iter().chain(cx.outer_type_params.iter().cloned()));
        ty.type_params = Some(cx.resolve_type_params(&clause, &scope));
    }

    let scope = type_scope(ty, &cx.outer_type_params);
    let mut extends = Vec::new();
    let mut implements = Vec::new();
    let mut current: Option<&mut Vec<TypeRef>> = None;
    for word in &words[rest..] {
        match word.as_str() {
            "extends" => current = Some(&mut extends),
            "implements" => current = Some(&mut implements),
            "permits" => current = None,
            other => {
                let other = other.trim_end_matches(',');
                if let Some(list) = current.as_mut()
                    && !other.is_empty()
                {
                    list.push(cx.resolve_type(other, &scope));
                }
            }
        }
    }
    if ty.kind.is_interface_like() {
        ty.interfaces = extends;
    } else {
        ty.supertype = extends.into_iter().next();
        ty.interfaces = implements;
    }
    Ok(())
}

/// Modifiers, type parameters and type from a summary type cell.
fn type_cell_parts(row: &SummaryRow, cx: &mut Context<'_>) -> Signature {
    let text = strip_annotations(&cx.resolved_text(&row.type_cell));
    head_parts(&tokenizer::words(&text))
}

/// Default visibility for members listed in a summary.
fn summary_modifiers(modifiers: Modifiers) -> Modifiers {
    if modifiers.intersects(Modifiers::PROTECTED | Modifiers::PRIVATE) {
        modifiers
    } else {
        modifiers | Modifiers::PUBLIC
    }
}

/// Member name from summary link text, which may be qualified for nested constructors.
fn member_name(text: &str) -> String {
    let name = text.trim();
    name.rsplit('.').next().unwrap_or(name).to_string()
}

fn add_summary_member(section: Section, row: &SummaryRow, ty: &mut TypeDef, cx: &mut Context<'_>) {
    let scope = type_scope(ty, &cx.outer_type_params);
    let cell = type_cell_parts(row, cx);
    let name = member_name(&row.name);
    match section {
        Section::FieldSummary => {
            if ty.field(&name).is_some() {
                return;
            }
            let ty_ref = cell
                .returns
                .as_deref()
                .map(|t| cx.resolve_type(t, &scope))
                .unwrap_or_default();
            ty.fields.push(Field {
                name,
                modifiers: summary_modifiers(cell.modifiers),
                ty: ty_ref,
                comment: Vec::new(),
                constant: None,
            });
        }
        Section::EnumConstantSummary => {
            if ty.enum_constants.iter().any(|c| c.name == name) {
                return;
            }
            ty.enum_constants.push(EnumConst {
                name,
                modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
                comment: Vec::new(),
            });
        }
        Section::ConstructorSummary | Section::MethodSummary => {
            let method = summary_method(name, &cell, row, &scope, cx);
            let is_constructor = section == Section::ConstructorSummary;
            let list = if is_constructor {
                &mut ty.constructors
            } else {
                &mut ty.methods
            };
            if !list.iter().any(|m| m.same_member(&method)) {
                list.push(Method {
                    returns: if is_constructor { None } else { method.returns },
                    ..method
                });
            }
        }
        Section::RequiredElementSummary | Section::OptionalElementSummary => {
            if ty.methods.iter().any(|m| m.name == name) {
                return;
            }
            let mut modifiers = summary_modifiers(cell.modifiers);
            if ty.kind == TypeKind::Annotation {
                modifiers |= Modifiers::ABSTRACT;
            }
            ty.methods.push(Method {
                name,
                modifiers,
                returns: cell.returns.as_deref().map(|t| cx.resolve_type(t, &scope)),
                optional: section == Section::OptionalElementSummary,
                ..Method::default()
            });
        }
        _ => {}
    }
}

fn summary_method(
    name: String,
    cell: &Signature,
    row: &SummaryRow,
    scope: &Enclosing,
    cx: &mut Context<'_>,
) -> Method {
    let scope = cell.type_params.as_deref().map_or_else(
        || scope.clone(),
        |clause| scope.with_type_params(tokenizer::type_parameter_names(clause)),
    );
    let tail = cx.resolved_text(&row.tail);
    let params = tokenizer::paren_span(&tail)
        .map(|(start, end)| parse_params(&tail[start..end]))
        .unwrap_or_default();
    Method {
        name,
        modifiers: summary_modifiers(cell.modifiers),
        type_params: cell
            .type_params
            .as_deref()
            .map(|clause| cx.resolve_type_params(clause, &scope)),
        params: resolve_params(&params, &scope, cx),
        returns: cell.returns.as_deref().map(|t| cx.resolve_type(t, &scope)),
        ..Method::default()
    }
}

fn resolve_params(
    params: &[(String, Option<String>)],
    scope: &Enclosing,
    cx: &mut Context<'_>,
) -> Vec<Param> {
    params
        .iter()
        .enumerate()
        .map(|(idx, (ty, name))| Param {
            name: name.clone().unwrap_or_else(|| format!("arg{idx}")),
            ty: cx.resolve_type(ty, scope),
        })
        .collect()
}

/// Read member details and the type comment into `ty`.
pub fn detail(
    behaviors: &Behaviors,
    page: &Page,
    ty: &mut TypeDef,
    cx: &mut Context<'_>,
) -> Result<()> {
    for section in Section::ALL.into_iter().filter(|s| !s.is_summary()) {
        let Some(region) = (behaviors.section)(page, section) else {
            continue;
        };
        for block in DetailBlock::collect(&region) {
            apply_detail(section, &block, ty, cx);
        }
    }
    ty.comment = read_notes(&behaviors.class_comment(page)).lines;
    ty.stage = Stage::Detailed;
    Ok(())
}

fn apply_detail(section: Section, block: &DetailBlock<'_>, ty: &mut TypeDef, cx: &mut Context<'_>) {
    let text = cx.resolved_text(&html::fragments(block.signature));
    let Some(sig) = parse_signature(&text) else {
        return;
    };
    let notes = read_notes(&block.notes);
    let scope = type_scope(ty, &cx.outer_type_params);
    let orphan = |member: String| Warning::MemberDetailOrphan {
        type_name: ty.name.clone(),
        member,
    };
    let name = member_name(&sig.name);

    match section {
        Section::FieldDetail => match ty.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.modifiers = sig.modifiers;
                field.comment = notes.lines;
            }
            None => cx.report.warn(orphan(name)),
        },
        Section::EnumConstantDetail => {
            match ty.enum_constants.iter_mut().find(|c| c.name == name) {
                Some(constant) => {
                    constant.modifiers = sig.modifiers;
                    constant.comment = notes.lines;
                }
                None => cx.report.warn(orphan(name)),
            }
        }
        Section::ElementDetail => match ty.methods.iter_mut().find(|m| m.name == name) {
            Some(element) => {
                element.modifiers = sig.modifiers;
                element.comment = notes.lines;
                if notes.default_value.is_some() {
                    element.default_value = notes.default_value;
                }
            }
            None => cx.report.warn(orphan(name)),
        },
        Section::MethodDetail | Section::ConstructorDetail => {
            let member_scope = sig.type_params.as_deref().map_or_else(
                || scope.clone(),
                |clause| scope.with_type_params(tokenizer::type_parameter_names(clause)),
            );
            let params = resolve_params(
                sig.params.as_deref().unwrap_or_default(),
                &member_scope,
                cx,
            );
            let probe = Method {
                name: name.clone(),
                params,
                ..Method::default()
            };
            let list = if section == Section::ConstructorDetail {
                &mut ty.constructors
            } else {
                &mut ty.methods
            };
            let Some(method) = list.iter_mut().find(|m| m.same_member(&probe)) else {
                cx.report.warn(orphan(probe.key()));
                return;
            };
            method.modifiers = sig.modifiers;
            method.comment = notes.lines;
            method.throws = sig
                .throws
                .iter()
                .map(|t| cx.resolve_type(t, &member_scope))
                .collect();
            for (param, detailed) in method.params.iter_mut().zip(probe.params) {
                param.name = detailed.name;
            }
            if method.type_params.is_none()
                && let Some(clause) = &sig.type_params
            {
                method.type_params = Some(cx.resolve_type_params(clause, &member_scope));
            }
            if section == Section::MethodDetail
                && method.returns.is_none()
                && let Some(returns) = &sig.returns
            {
                method.returns = Some(cx.resolve_type(returns, &member_scope));
            }
        }
        _ => {}
    }
}

/// Comment lines and the annotation default read from note elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    /// Free text and tag lines.
    pub lines: Vec<String>,
    /// Value of a `Default:` entry.
    pub default_value: Option<String>,
}

/// Read comment blocks and tag lists.
pub fn read_notes(elements: &[ElementRef<'_>]) -> Notes {
    let mut notes = Notes::default();
    for el in elements {
        match el.value().name() {
            "dl" => read_dl(*el, &mut notes),
            "dd" => {
                push_line(&mut notes.lines, own_text(*el));
                for nested in html::child_elements(*el).filter(|c| c.value().name() == "dl") {
                    read_dl(nested, &mut notes);
                }
            }
            _ => push_line(&mut notes.lines, html::fragments_text(&html::fragments(*el))),
        }
    }
    notes
}

fn read_dl(dl: ElementRef<'_>, notes: &mut Notes) {
    let mut label: Option<String> = None;
    for child in html::child_elements(dl) {
        match child.value().name() {
            "dt" => {
                label = Some(html::text_of(child).trim_end_matches(':').trim().to_string());
            }
            "dd" => {
                let text = own_text(child);
                match label.as_deref() {
                    None => push_line(&mut notes.lines, text),
                    Some(label) if !text.is_empty() => tag_line(label, text, notes),
                    Some(_) => {}
                }
                for nested in html::child_elements(child).filter(|c| c.value().name() == "dl") {
                    read_dl(nested, notes);
                }
            }
            _ => {}
        }
    }
}

/// Text of `el` without nested definition lists.
fn own_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if element.name() != "dl" => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push(' ');
                    out.push_str(&html::fragments_text(&html::fragments(child_el)));
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
    html::normalize(&out)
}

fn push_line(lines: &mut Vec<String>, text: String) {
    if !text.is_empty() {
        lines.push(text);
    }
}

/// Translate a labelled note into a tag line.
fn tag_line(label: &str, text: String, notes: &mut Notes) {
    let split = |text: &str| match text.split_once(" - ") {
        Some((head, desc)) => format!("{} {}", head.trim(), desc.trim()),
        None => text.trim().to_string(),
    };
    let line = match label {
        "Parameters" => format!("@param {}", split(&text)),
        "Type Parameters" => {
            let line = split(&text);
            let (var, desc) = line.split_once(' ').unwrap_or((line.as_str(), ""));
            let var = var.trim_start_matches('<').trim_end_matches('>');
            format!("@param <{var}> {desc}").trim_end().to_string()
        }
        "Returns" => format!("@return {text}"),
        "Throws" => format!("@throws {}", split(&text)),
        "See Also" => format!("@see {text}"),
        "Since" => format!("@since {text}"),
        "Author" => format!("@author {text}"),
        "Version" => format!("@version {text}"),
        "Default" => {
            notes.default_value = Some(text);
            return;
        }
        _ => return,
    };
    notes.lines.push(line);
}
