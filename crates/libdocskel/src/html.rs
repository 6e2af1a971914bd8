//! Loaded documentation pages and the node walks the strategies share.

use std::{fs, path::Path};

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::Result;

/// A piece of inline page content: plain text or a hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text outside any link.
    Text(String),
    /// An `a[href]` element and its text.
    Link {
        /// The `href` attribute as written.
        href: String,
        /// The link's visible text.
        text: String,
    },
}

impl Fragment {
    /// The visible text of the fragment.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Link { text, .. } => text,
        }
    }
}

/// Page bytes as text: UTF-8 when valid, otherwise ISO-8859-1, the older generators' default.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| err.into_bytes().into_iter().map(char::from).collect())
}

/// A parsed documentation page.
pub struct Page {
    html: Html,
    /// Directory of the page relative to the documentation root, `/`-separated.
    dir: String,
}

impl Page {
    /// Read and parse the page at `root/relative`.
    pub fn load(root: &Path, relative: &str) -> Result<Self> {
        let text = decode(fs::read(root.join(relative))?);
        let dir = relative
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir)
            .to_string();
        Ok(Self::parse(&text, dir))
    }

    /// Parse page text located in `dir` (relative to the documentation root).
    pub fn parse(text: &str, dir: impl Into<String>) -> Self {
        Self {
            html: Html::parse_document(text),
            dir: dir.into(),
        }
    }

    /// Directory of the page relative to the documentation root.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// The document's root element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Every element matching `css`, in document order. Invalid selectors match nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        select_in(self.root(), css)
    }

    /// The first element matching `css`.
    pub fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        self.select(css).into_iter().next()
    }

    /// The first element whose `id` or `name` equals one of `keys`, trying keys in order.
    pub fn find_by_anchor(&self, keys: &[&str]) -> Option<ElementRef<'_>> {
        let anchors = self.select("[id], a[name]");
        keys.iter().find_map(|key| {
            anchors
                .iter()
                .find(|el| el.value().id() == Some(*key) || el.attr("name") == Some(*key))
                .copied()
        })
    }

    /// Text of every comment node in the document.
    pub fn comments(&self) -> Vec<&str> {
        self.html
            .tree
            .values()
            .filter_map(|node| match node {
                Node::Comment(comment) => Some(&**comment),
                _ => None,
            })
            .collect()
    }
}

/// Parse a CSS selector; `None` for invalid input.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Descendants of `scope` matching `css`.
pub fn select_in<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    selector(css).map_or_else(Vec::new, |sel| scope.select(&sel).collect())
}

/// Whether `el` matches `css`.
pub fn matches(el: ElementRef<'_>, css: &str) -> bool {
    selector(css).is_some_and(|sel| sel.matches(&el))
}

/// Collapse runs of whitespace to single spaces and drop zero-width spaces.
pub fn normalize(text: &str) -> String {
    text.replace('\u{200b}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized text content of an element.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

/// Lowercased tag name.
pub fn tag(el: ElementRef<'_>) -> String {
    el.value().name().to_ascii_lowercase()
}

/// Whether `el` is an `h1`..`h6` heading.
pub fn is_heading(el: ElementRef<'_>) -> bool {
    matches!(
        el.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Whether `el` carries any of `classes`.
pub fn has_any_class(el: ElementRef<'_>, classes: &[&str]) -> bool {
    el.value().classes().any(|c| classes.contains(&c))
}

/// The next sibling element.
pub fn next_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Direct child elements.
pub fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

/// The parent element.
pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// The closest ancestor (excluding `el`) named `name`.
pub fn closest<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == name)
}

/// Inline content of `el` as text and link fragments.
pub fn fragments(el: ElementRef<'_>) -> Vec<Fragment> {
    let mut out = Vec::new();
    collect_fragments(el, &mut out);
    out
}

/// Fragments of `scope` that follow the link element `link`.
pub fn fragments_after(scope: ElementRef<'_>, link: ElementRef<'_>) -> Vec<Fragment> {
    let href = link.attr("href").unwrap_or_default();
    let text = link.text().collect::<String>();
    let all = fragments(scope);
    let start = all
        .iter()
        .position(|f| matches!(f, Fragment::Link { href: h, text: t } if h == href && *t == text))
        .map_or(all.len(), |idx| idx + 1);
    all[start..].to_vec()
}

/// Elements whose boundaries separate words.
const BLOCKS: &[&str] = &[
    "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5", "h6", "li", "p", "pre", "table", "td",
    "th", "tr", "ul",
];

fn collect_fragments(el: ElementRef<'_>, out: &mut Vec<Fragment>) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => push_text(out, text),
            Node::Element(element) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match (element.name(), element.attr("href")) {
                    // Type variables link to their declaring page; they stay plain text.
                    ("a", Some(_)) if is_type_variable_link(element) => {
                        push_text(out, &child_el.text().collect::<String>());
                    }
                    ("a", Some(href)) => out.push(Fragment::Link {
                        href: href.to_string(),
                        text: child_el.text().collect(),
                    }),
                    ("br", _) => push_text(out, " "),
                    (name, _) if BLOCKS.contains(&name) => {
                        push_text(out, " ");
                        collect_fragments(child_el, out);
                        push_text(out, " ");
                    }
                    _ => collect_fragments(child_el, out),
                }
            }
            _ => {}
        }
    }
}

fn is_type_variable_link(element: &scraper::node::Element) -> bool {
    element
        .attr("title")
        .is_some_and(|t| t.starts_with("type parameter in"))
}

fn push_text(out: &mut Vec<Fragment>, text: &str) {
    if let Some(Fragment::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Fragment::Text(text.to_string()));
    }
}

/// Concatenated text of `fragments`, normalized.
pub fn fragments_text(fragments: &[Fragment]) -> String {
    normalize(&fragments.iter().map(Fragment::text).collect::<String>())
}
