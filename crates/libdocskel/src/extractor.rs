//! The extraction driver: discovery, per-type extraction, constants and linking.

use std::{collections::HashSet, path::Path};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    constants::apply_constants,
    error::{DocskelError, Result},
    filter::Filter,
    html::Page,
    links::{self, LinkResolver},
    model::{Model, TypeDef, simple_name},
    names::NameResolver,
    report::Report,
    strategy::{
        Behaviors, Format, MARKER_PAGES, detect_version, parse_version,
        steps::{self, Context},
    },
};

/// Events reported while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The layout family was chosen.
    FormatSelected {
        /// Chosen format.
        format: Format,
        /// Generator version text from the marker, if found.
        generator: Option<String>,
    },
    /// The all-types index was read.
    Discovered {
        /// Number of types selected for extraction.
        total: usize,
    },
    /// A type page is about to be extracted.
    Type {
        /// Zero-based position.
        index: usize,
        /// Number of types selected for extraction.
        total: usize,
        /// Canonical name.
        name: String,
    },
    /// The constant values page is being applied.
    Constants,
    /// The model is being linked.
    Linking,
    /// The run finished.
    Done {
        /// Number of types that failed.
        failures: usize,
    },
}

/// Result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// Layout family used to read the tree.
    pub format: Format,
    /// Generator version text, if the tree carried a marker.
    pub generator: Option<String>,
    /// The extracted model.
    pub model: Model,
    /// Failures and warnings.
    pub report: Report,
}

/// A type named by the all-types index.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Discovered {
    /// Canonical name.
    name: String,
    /// Page path relative to the root.
    page: String,
}

/// Reads a documentation tree into a [`Model`].
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    /// Accepted roots for absolute links.
    external_roots: Vec<String>,
    /// Which types to extract.
    filter: Filter,
    /// Overrides marker-based format detection.
    format: Option<Format>,
}

impl Extractor {
    /// Create an extractor with no external roots, no filter and automatic format detection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted external documentation roots.
    pub fn with_external_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Accept one more external documentation root.
    pub fn with_external_root(mut self, root: impl Into<String>) -> Self {
        self.external_roots.push(root.into());
        self
    }

    /// Restrict extraction to types matching `filter`.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Force a layout family instead of detecting it.
    pub fn with_format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    /// Extract the tree at `root`.
    pub fn run(&self, root: &Path) -> Result<Extraction> {
        self.run_with_progress(root, &mut |_| {})
    }

    /// Extract the tree at `root`, reporting progress through `progress`.
    pub fn run_with_progress(
        &self,
        root: &Path,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Extraction> {
        let generator = probe_generator(root);
        let format = self.format.unwrap_or_else(|| {
            Format::select(generator.as_deref().and_then(parse_version).as_ref())
        });
        info!(
            "reading {} as {format} (generator {})",
            root.display(),
            generator.as_deref().unwrap_or("unknown")
        );
        progress(Progress::FormatSelected {
            format,
            generator: generator.clone(),
        });
        let behaviors = format.behaviors();
        let links = LinkResolver::new(self.external_roots.iter().cloned());

        let discovered = discover(root, &behaviors, &links)?;
        let mut names = NameResolver::new();
        for d in &discovered {
            names.add(d.name.clone());
        }
        let mut selected: Vec<&Discovered> = discovered
            .iter()
            .filter(|d| self.filter.matches(&d.name))
            .collect();
        // Enclosing types first, so nested types see their type variables.
        selected.sort_by_key(|d| d.name.matches('$').count());
        let mut model = Model::new();
        for d in &selected {
            model.stub(&d.name);
        }
        let total = selected.len();
        info!(
            "discovered {} types, extracting {total}",
            discovered.len()
        );
        progress(Progress::Discovered { total });

        let mut report = Report::default();
        for (index, d) in selected.iter().enumerate() {
            progress(Progress::Type {
                index,
                total,
                name: d.name.clone(),
            });
            debug!("extracting {} from {}", d.name, d.page);
            let outcome = Page::load(root, &d.page).and_then(|page| {
                extract_type(
                    &behaviors,
                    &page,
                    &d.name,
                    &mut model,
                    &mut names,
                    &links,
                    &mut report,
                )
            });
            if let Err(e) = outcome {
                report.fail(d.name.clone(), e);
            }
        }

        progress(Progress::Constants);
        apply_constants(
            root,
            &behaviors,
            &links,
            &mut model,
            &mut report,
            self.filter.is_active(),
        )?;

        progress(Progress::Linking);
        model.link(&mut report);
        info!(
            "extracted {} types: {} failed, {} warnings",
            model.len(),
            report.failures.len(),
            report.warnings.len()
        );
        progress(Progress::Done {
            failures: report.failures.len(),
        });

        Ok(Extraction {
            format,
            generator,
            model,
            report,
        })
    }
}

/// Run the shared steps for one type, committing after each completed stage.
fn extract_type(
    behaviors: &Behaviors,
    page: &Page,
    name: &str,
    model: &mut Model,
    names: &mut NameResolver,
    links: &LinkResolver,
    report: &mut Report,
) -> Result<()> {
    let mut work = model
        .get(name)
        .cloned()
        .unwrap_or_else(|| TypeDef::stub(name));
    let mut cx = Context::new(names, links, report, name, page.dir())
        .with_outer_type_params(outer_type_params(model, name));
    steps::summarize(behaviors, page, &mut work, &mut cx)?;
    model.commit(work.clone());
    steps::detail(behaviors, page, &mut work, &mut cx)?;
    model.commit(work);
    Ok(())
}

/// Type variables declared by the types enclosing `name`, innermost first.
fn outer_type_params(model: &Model, name: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut current = name;
    while let Some((enclosing, _)) = current.rsplit_once('$') {
        if let Some(ty) = model.get(enclosing) {
            params.extend(ty.type_param_names());
        }
        current = enclosing;
    }
    params
}

/// The generator version text of the first marker found on the usual entry pages.
fn probe_generator(root: &Path) -> Option<String> {
    MARKER_PAGES
        .iter()
        .filter(|name| root.join(name).is_file())
        .find_map(|name| match Page::load(root, name) {
            Ok(page) => detect_version(&page),
            Err(e) => {
                debug!("cannot probe {name} for a generator marker: {e}");
                None
            }
        })
}

/// Read the type list from the first usable index page.
fn discover(root: &Path, behaviors: &Behaviors, links: &LinkResolver) -> Result<Vec<Discovered>> {
    let mut tried = Vec::new();
    for index in behaviors.index_pages {
        let path = root.join(index);
        if !path.is_file() {
            continue;
        }
        tried.push(*index);
        let page = Page::load(root, index)
            .map_err(|e| DocskelError::AllTypeDiscovery(path.clone(), e.to_string()))?;
        let found = index_entries(&page, links);
        if !found.is_empty() {
            debug!("{} types listed in {index}", found.len());
            return Ok(found);
        }
    }
    let cause = if tried.is_empty() {
        format!("none of {} exists", behaviors.index_pages.join(", "))
    } else {
        format!("no types listed in {}", tried.join(", "))
    };
    Err(DocskelError::AllTypeDiscovery(root.to_path_buf(), cause))
}

/// Type links of an index page, deduplicated in page order.
///
/// Links carrying a `title` such as `class in p` are authoritative, whatever the case of the
/// type name. Very old trees have no titles; there every relative link to a capitalized page
/// name counts.
fn index_entries(page: &Page, links: &LinkResolver) -> Vec<Discovered> {
    let anchors = page.select("a[href]");
    let titled: Vec<_> = anchors
        .iter()
        .filter(|a| a.attr("title").is_some_and(|t| t.contains(" in ")))
        .copied()
        .collect();
    let trust_titles = !titled.is_empty();
    let candidates = if trust_titles { titled } else { anchors };

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for a in candidates {
        let Some(href) = a.attr("href") else {
            continue;
        };
        if links::is_absolute(href) {
            continue;
        }
        let Ok(name) = links.resolve_from(page.dir(), href) else {
            continue;
        };
        if !links::is_type_name(&name)
            || (!trust_titles && !simple_name(&name).starts_with(|c: char| c.is_uppercase()))
        {
            continue;
        }
        if seen.insert(name.clone()) {
            let page_path = href.split('#').next().unwrap_or(href).to_string();
            found.push(Discovered {
                name,
                page: page_path,
            });
        }
    }
    found
}
