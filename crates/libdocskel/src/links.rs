//! Reduction of documentation hyperlinks to canonical type names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DocskelError, Result};

/// Matches any link that carries a URI scheme.
static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern must compile"));

/// API roots of the platform documentation, which every tree links to without configuration.
static BUILTIN_HOSTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:docs|download|java)\.(?:oracle|sun)\.com/(?:j2se/[^/]+/docs/api|javase/[^/]+/docs/api|en/java/javase/[^/]+/docs/api)/",
    )
    .expect("builtin host pattern must compile")
});

/// Converts links found in documentation pages into canonical type names.
///
/// Relative links are interpreted against the documentation root; absolute links must start with
/// a built-in documentation host or one of the configured external roots.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    /// External documentation roots, each ending in `/`.
    external_roots: Vec<String>,
}

impl LinkResolver {
    /// Create a resolver that also accepts links under the given external roots.
    pub fn new<I, S>(external_roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let external_roots = external_roots
            .into_iter()
            .map(Into::into)
            .map(|root: String| {
                if root.ends_with('/') {
                    root
                } else {
                    format!("{root}/")
                }
            })
            .collect();
        Self { external_roots }
    }

    /// The configured external roots.
    pub fn external_roots(&self) -> &[String] {
        &self.external_roots
    }

    /// Resolve `link` to a canonical type name such as `java.util.Map$Entry`.
    pub fn resolve(&self, link: &str) -> Result<String> {
        let relative = self.relative_part(link)?;
        path_to_name(relative).ok_or_else(|| DocskelError::UnresolvedLink(link.to_string()))
    }

    /// Resolve `link` as it appears on a page located in `page_dir` (relative to the root).
    ///
    /// Relative links are first joined onto the page directory, so same-package links such as
    /// `B.html` resolve to their qualified name.
    pub fn resolve_from(&self, page_dir: &str, link: &str) -> Result<String> {
        if is_absolute(link) || page_dir.is_empty() {
            return self.resolve(link);
        }
        if link.split('#').next().unwrap_or_default().is_empty() {
            return Err(DocskelError::UnresolvedLink(link.to_string()));
        }
        let joined = join_relative(page_dir, link);
        path_to_name(&joined).ok_or_else(|| DocskelError::UnresolvedLink(link.to_string()))
    }

    /// Strip the scheme and root of an absolute link, or return a relative link unchanged.
    fn relative_part<'a>(&self, link: &'a str) -> Result<&'a str> {
        if !is_absolute(link) {
            return Ok(link);
        }
        if let Some(m) = BUILTIN_HOSTS.find(link) {
            return Ok(&link[m.end()..]);
        }
        self.external_roots
            .iter()
            .find_map(|root| link.strip_prefix(root.as_str()))
            .ok_or_else(|| DocskelError::UnresolvedLink(link.to_string()))
    }
}

/// Whether `link` carries a URI scheme.
pub fn is_absolute(link: &str) -> bool {
    SCHEME.is_match(link)
}

/// The fragment of a link, without the leading `#`.
pub fn fragment(link: &str) -> Option<&str> {
    link.split_once('#')
        .map(|(_, frag)| frag)
        .filter(|frag| !frag.is_empty())
}

/// Whether a canonical name produced from a link denotes a type page rather than an index page
/// such as `package-summary` or `constant-values`.
pub fn is_type_name(name: &str) -> bool {
    let simple = name.rsplit('.').next().unwrap_or(name);
    !simple.is_empty() && !simple.contains('-')
}

/// Join a relative link onto a page directory, collapsing `.` and `..` segments.
fn join_relative(page_dir: &str, link: &str) -> String {
    let mut segments: Vec<&str> = page_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in link.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Convert a root-relative file path into a canonical type name.
fn path_to_name(path: &str) -> Option<String> {
    let path = path.split(['#', '?']).next().unwrap_or_default();
    if path.ends_with('/') {
        return None;
    }
    let mut segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .skip_while(|s| *s == "..")
        .collect();
    // Module directories (`java.base/`) are the only non-final segments containing a dot.
    while segments.len() > 1 && segments[0].contains('.') {
        segments.remove(0);
    }
    let file = segments.pop()?;
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    if stem.is_empty() {
        return None;
    }
    segments.push(stem);
    let name = segments
        .iter()
        .map(|s| s.replace('.', "$"))
        .collect::<Vec<_>>()
        .join(".");
    Some(name)
}
