//! Format-specific page decoding.
//!
//! Every generator release changed the HTML it writes. A [`Format`] names one layout family and
//! resolves to a [`Behaviors`] table: the `Legacy` behaviors overridden, in order, by every newer
//! format up to the selected one. The shared extraction steps in [`steps`] only talk to the table.

mod jdk11;
mod jdk12;
mod jdk13;
mod jdk8;
mod legacy;
pub mod steps;

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};
use semver::Version;
use serde::Serialize;

use crate::{
    error::{DocskelError, Result},
    html::{self, Fragment, Page},
    model::TypeKind,
};

/// Matches the generator marker comment, capturing the version text.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Generated by javadoc \((?:build )?([^)]+)\)").expect("marker pattern must compile")
});

/// Pages probed, in order, for the generator marker.
pub const MARKER_PAGES: &[&str] = &[
    "index.html",
    "allclasses-index.html",
    "allclasses.html",
    "allclasses-noframe.html",
    "allclasses-frame.html",
    "overview-summary.html",
];

/// A documentation layout family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Generators before 8.
    #[default]
    Legacy,
    /// 8 through 10.
    Jdk8,
    /// 11.
    Jdk11,
    /// 12.
    Jdk12,
    /// 13 and later.
    Jdk13,
}

impl Format {
    /// Every format, oldest first.
    pub const ALL: [Self; 5] = [
        Self::Legacy,
        Self::Jdk8,
        Self::Jdk11,
        Self::Jdk12,
        Self::Jdk13,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Jdk8 => "jdk8",
            Self::Jdk11 => "jdk11",
            Self::Jdk12 => "jdk12",
            Self::Jdk13 => "jdk13",
        }
    }

    /// Half-open range of generator major versions, `[from, until)`.
    pub fn majors(self) -> (u64, Option<u64>) {
        match self {
            Self::Legacy => (0, Some(8)),
            Self::Jdk8 => (8, Some(11)),
            Self::Jdk11 => (11, Some(12)),
            Self::Jdk12 => (12, Some(13)),
            Self::Jdk13 => (13, None),
        }
    }

    /// Whether pages written by generator `version` use this layout.
    pub fn is_applicable(self, version: &Version) -> bool {
        let (from, until) = self.majors();
        version.major >= from && until.is_none_or(|until| version.major < until)
    }

    /// The newest format applicable to `version`; `Legacy` when the version is unknown.
    pub fn select(version: Option<&Version>) -> Self {
        version
            .and_then(|v| {
                Self::ALL
                    .iter()
                    .rev()
                    .copied()
                    .find(|f| f.is_applicable(v))
            })
            .unwrap_or_default()
    }

    /// Behaviors of this format: every override from `Legacy` up to `self`, newest last.
    pub fn behaviors(self) -> Behaviors {
        Self::ALL
            .iter()
            .copied()
            .take_while(|f| *f <= self)
            .fold(legacy::behaviors(), |base, format| match format {
                Self::Legacy => base,
                Self::Jdk8 => jdk8::apply(base),
                Self::Jdk11 => jdk11::apply(base),
                Self::Jdk12 => jdk12::apply(base),
                Self::Jdk13 => jdk13::apply(base),
            })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = DocskelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DocskelError::UnknownFormat(s.to_string()))
    }
}

/// The generator version text of the first marker comment on `page`.
pub fn detect_version(page: &Page) -> Option<String> {
    page.comments()
        .into_iter()
        .find_map(|c| MARKER.captures(c))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Convert generator version text (`1.6.0_20`, `11.0.2`, `13-ea`) to a version whose major
/// component is the platform release.
pub fn parse_version(text: &str) -> Option<Version> {
    let numeric: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parts: Vec<u64> = numeric
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    let parts = match parts.as_slice() {
        [1, rest @ ..] if !rest.is_empty() => rest,
        other => other,
    };
    let major = *parts.first()?;
    Some(Version::new(
        major,
        parts.get(1).copied().unwrap_or(0),
        parts.get(2).copied().unwrap_or(0),
    ))
}

/// Sections of a type page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Field summary table.
    FieldSummary,
    /// Enum constant summary table.
    EnumConstantSummary,
    /// Constructor summary table.
    ConstructorSummary,
    /// Method summary table.
    MethodSummary,
    /// Required annotation element summary table.
    RequiredElementSummary,
    /// Optional annotation element summary table.
    OptionalElementSummary,
    /// Field details.
    FieldDetail,
    /// Enum constant details.
    EnumConstantDetail,
    /// Constructor details.
    ConstructorDetail,
    /// Method details.
    MethodDetail,
    /// Annotation element details.
    ElementDetail,
}

impl Section {
    /// Every section, summaries first.
    pub const ALL: [Self; 11] = [
        Self::FieldSummary,
        Self::EnumConstantSummary,
        Self::ConstructorSummary,
        Self::MethodSummary,
        Self::RequiredElementSummary,
        Self::OptionalElementSummary,
        Self::FieldDetail,
        Self::EnumConstantDetail,
        Self::ConstructorDetail,
        Self::MethodDetail,
        Self::ElementDetail,
    ];

    /// Anchor name used by the oldest layouts; newer keys derive from it.
    pub fn legacy_key(self) -> &'static str {
        match self {
            Self::FieldSummary => "field_summary",
            Self::EnumConstantSummary => "enum_constant_summary",
            Self::ConstructorSummary => "constructor_summary",
            Self::MethodSummary => "method_summary",
            Self::RequiredElementSummary => "annotation_type_required_element_summary",
            Self::OptionalElementSummary => "annotation_type_optional_element_summary",
            Self::FieldDetail => "field_detail",
            Self::EnumConstantDetail => "enum_constant_detail",
            Self::ConstructorDetail => "constructor_detail",
            Self::MethodDetail => "method_detail",
            Self::ElementDetail => "annotation_type_element_detail",
        }
    }

    /// Anchor name in the dotted style (`method.summary`).
    pub fn dotted_key(self) -> String {
        self.legacy_key().replace('_', ".")
    }

    /// Whether this is a summary table rather than a detail list.
    pub fn is_summary(self) -> bool {
        self.legacy_key().ends_with("summary")
    }

    /// Whether `name` is the anchor of any section in any layout.
    pub fn is_section_key(name: &str) -> bool {
        let name = name.replace(['.', '-'], "_");
        let name = name.replace("annotation_interface", "annotation_type");
        Self::ALL.iter().any(|s| s.legacy_key() == name)
    }
}

/// The elements making up one section of a page.
#[derive(Debug, Clone, Default)]
pub struct Region<'a> {
    /// Top-level elements of the section, in document order.
    pub elements: Vec<ElementRef<'a>>,
}

impl<'a> Region<'a> {
    /// A region consisting of a single container element.
    pub fn single(el: ElementRef<'a>) -> Self {
        Self { elements: vec![el] }
    }

    /// The region an anchor introduces: its container when it opens one, otherwise the flat run
    /// of following siblings up to the next section boundary.
    pub fn from_anchor(anchor: ElementRef<'a>, summary: bool) -> Self {
        if matches!(anchor.value().name(), "section" | "li") {
            return Self::single(anchor);
        }
        if let Some(parent) = html::parent_element(anchor)
            && matches!(parent.value().name(), "section" | "li")
        {
            return Self::single(parent);
        }
        let mut elements = Vec::new();
        for node in anchor.next_siblings() {
            match node.value() {
                Node::Comment(comment) if comment.contains("====") => break,
                Node::Element(_) => {
                    let Some(el) = ElementRef::wrap(node) else {
                        continue;
                    };
                    if is_boundary(el, summary) {
                        break;
                    }
                    elements.push(el);
                }
                _ => {}
            }
        }
        Self { elements }
    }

    /// Elements of the region, and their descendants, matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'a>> {
        let mut out: Vec<ElementRef<'a>> = Vec::new();
        for el in &self.elements {
            if html::matches(*el, css) {
                out.push(*el);
            }
            out.extend(html::select_in(*el, css));
        }
        out
    }

    /// Whether the region contains nothing.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Whether `el` ends a flat section run.
fn is_boundary(el: ElementRef<'_>, summary: bool) -> bool {
    if el.value().name() != "a" {
        return false;
    }
    let anchor = el.attr("name").or_else(|| el.value().id());
    match anchor {
        Some(_) if summary => true,
        Some(name) => Section::is_section_key(name),
        None => false,
    }
}

/// One row of a summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Text of the member link.
    pub name: String,
    /// Target of the member link.
    pub href: String,
    /// Content of the cell preceding the name cell (modifiers and type).
    pub type_cell: Vec<Fragment>,
    /// Content after the member link within its code span (parameter list).
    pub tail: Vec<Fragment>,
    /// Text of the row's last cell.
    pub last_cell: String,
}

impl SummaryRow {
    /// Build a row from its cells; `None` when no cell holds a member link.
    pub fn from_cells(cells: &[ElementRef<'_>]) -> Option<Self> {
        let (index, link) = cells.iter().enumerate().find_map(|(idx, cell)| {
            html::select_in(*cell, "a[href]")
                .into_iter()
                .find(|a| a.attr("href").is_some_and(|h| h.contains('#')))
                .map(|a| (idx, a))
        })?;
        let name = html::text_of(link);
        if name.is_empty() {
            return None;
        }
        let scope = html::closest(link, "code").unwrap_or(cells[index]);
        Some(Self {
            name,
            href: link.attr("href").unwrap_or_default().to_string(),
            type_cell: index
                .checked_sub(1)
                .map(|prev| html::fragments(cells[prev]))
                .unwrap_or_default(),
            tail: html::fragments_after(scope, link),
            last_cell: cells.last().map(|c| html::text_of(*c)).unwrap_or_default(),
        })
    }
}

/// A member detail: its heading, signature element and the notes following the signature.
#[derive(Debug, Clone)]
pub struct DetailBlock<'a> {
    /// Heading text, normally the member name.
    pub heading: String,
    /// The signature element.
    pub signature: ElementRef<'a>,
    /// Comment blocks and tag lists after the signature.
    pub notes: Vec<ElementRef<'a>>,
}

impl<'a> DetailBlock<'a> {
    /// Every detail block in `region`.
    pub fn collect(region: &Region<'a>) -> Vec<Self> {
        region
            .select("h2, h3, h4, h5")
            .into_iter()
            .filter_map(|heading| {
                let signature = html::next_element(heading)?;
                let is_signature = signature.value().name() == "pre"
                    || html::has_any_class(signature, &["memberSignature", "member-signature"]);
                is_signature.then(|| Self {
                    heading: html::text_of(heading),
                    signature,
                    notes: notes_after(signature),
                })
            })
            .collect()
    }
}

/// Comment elements following `el` up to the next rule, heading or anchor.
pub fn notes_after(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sib| {
            let name = sib.value().name();
            name != "hr" && !html::is_heading(*sib) && !(name == "a" && sib.attr("href").is_none())
        })
        .filter(|sib| {
            matches!(sib.value().name(), "dl" | "p" | "dd")
                || (sib.value().name() == "div" && html::has_any_class(*sib, &["block"]))
        })
        .collect()
}

/// Format-specific behaviors.
#[derive(Clone, Copy)]
pub struct Behaviors {
    /// The format these behaviors were built for.
    pub format: Format,
    /// Candidate all-types index pages, preferred first.
    pub index_pages: &'static [&'static str],
    /// Kind of the type a page documents.
    pub classify: fn(&Page) -> Option<TypeKind>,
    /// The element holding the type declaration.
    pub declaration: for<'a> fn(&'a Page) -> Option<ElementRef<'a>>,
    /// Locate a section of the page.
    pub section: for<'a> fn(&'a Page, Section) -> Option<Region<'a>>,
    /// Rows of a summary region.
    pub summary_rows: for<'a> fn(&Region<'a>) -> Vec<SummaryRow>,
}

impl fmt::Debug for Behaviors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behaviors")
            .field("format", &self.format)
            .field("index_pages", &self.index_pages)
            .finish_non_exhaustive()
    }
}

impl Behaviors {
    /// Elements of the type comment: siblings after the declaration up to the next rule or
    /// heading, plus any type-parameter notes placed before it.
    pub fn class_comment<'a>(&self, page: &'a Page) -> Vec<ElementRef<'a>> {
        let Some(declaration) = (self.declaration)(page) else {
            return Vec::new();
        };
        let mut notes: Vec<ElementRef<'a>> = declaration
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sib| {
                sib.value().name() == "dl"
                    && html::select_in(*sib, "dt")
                        .first()
                        .is_some_and(|dt| html::text_of(*dt).starts_with("Type Parameters"))
            })
            .collect();
        notes.reverse();
        notes.extend(notes_after(declaration));
        notes
    }
}

/// Keyword-based kind detection over header text such as `Interface Map<K,V>`.
pub(crate) fn kind_from_header(text: &str) -> Option<TypeKind> {
    text.split_whitespace().find_map(|word| match word {
        "Annotation" => Some(TypeKind::Annotation),
        "Enum" => Some(TypeKind::Enum),
        "Interface" => Some(TypeKind::Interface),
        "Class" | "Record" => Some(TypeKind::Class),
        _ => None,
    })
}
