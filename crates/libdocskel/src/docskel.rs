use std::path::{Path, PathBuf};

use super::{
    error::*,
    extractor::{Extraction, Extractor, Progress},
    filter::Filter,
    frontmatter::{FrontmatterConfig, FrontmatterHit, FrontmatterSearch},
    matcher::{Correspondence, match_models},
    render::*,
    search::{ListItem, SearchIndex, SearchOptions, SearchResponse, build_render_selection},
    strategy::Format,
};

/// Docskel reconstructs the API of a class library from its generated javadoc HTML.
///
/// A documentation tree is read into a version-independent model, which can then be rendered as
/// Java source stubs with every body replaced by a `throw`, searched, listed, dumped as JSON, or
/// compared structurally against the model of another tree. Extraction never stops at a broken
/// page: failures and warnings travel with the model in its [`crate::Report`].
#[derive(Debug, Clone)]
pub struct Docskel {
    /// Extraction settings.
    extractor: Extractor,

    /// Text of the type filter, for frontmatter.
    filter: Option<String>,

    /// Whether to emit comments with rendered output.
    comments: bool,

    /// Whether to emit frontmatter comments with rendered output.
    frontmatter: bool,
}

impl Default for Docskel {
    fn default() -> Self {
        Self::new()
    }
}

impl Docskel {
    /// Creates a new Docskel instance with default configuration: automatic format detection, no
    /// filter, comments and frontmatter on.
    ///
    /// # Documentation roots
    ///
    /// A root is the directory holding the all-types index (`allclasses-index.html`,
    /// `allclasses.html`, `allclasses-noframe.html` or `allclasses-frame.html`) and, optionally,
    /// `constant-values.html`. A path to any file inside the root directory is accepted too.
    pub fn new() -> Self {
        Self {
            extractor: Extractor::new(),
            filter: None,
            comments: true,
            frontmatter: true,
        }
    }

    /// Accept absolute links under the given documentation roots.
    pub fn with_external_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extractor = self.extractor.with_external_roots(roots);
        self
    }

    /// Restrict extraction to types whose canonical name matches `filter`.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter.as_str().map(str::to_string);
        self.extractor = self.extractor.with_filter(filter);
        self
    }

    /// Force a layout family instead of detecting it from the generator marker.
    pub fn with_format(mut self, format: Option<Format>) -> Self {
        self.extractor = self.extractor.with_format(format);
        self
    }

    /// Enables or disables comments on rendered output.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Enables or disables frontmatter emission on rendered output.
    pub fn with_frontmatter(mut self, frontmatter: bool) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Read the documentation tree at `root` into a model.
    pub fn inspect(&self, root: &Path) -> Result<Extraction> {
        self.inspect_with_progress(root, &mut |_| {})
    }

    /// Read the documentation tree at `root`, reporting progress through `progress`.
    pub fn inspect_with_progress(
        &self,
        root: &Path,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Extraction> {
        self.extractor
            .run_with_progress(&tree_root(root), progress)
    }

    /// Render the tree at `root` as Java stubs.
    pub fn render(&self, root: &Path) -> Result<String> {
        let extraction = self.inspect(root)?;
        self.render_extraction(root, &extraction)
    }

    /// Render an extraction of the tree at `root` as Java stubs.
    pub fn render_extraction(&self, root: &Path, extraction: &Extraction) -> Result<String> {
        let mut renderer = Renderer::default().with_comments(self.comments);
        if let Some(frontmatter) = self.frontmatter_for(root, extraction) {
            renderer = renderer.with_frontmatter(frontmatter);
        }
        renderer.render(&extraction.model)
    }

    /// Write one Java stub per top-level type of an extraction under `out`.
    pub fn write_tree(
        &self,
        root: &Path,
        extraction: &Extraction,
        out: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut renderer = Renderer::default().with_comments(self.comments);
        if let Some(frontmatter) = self.frontmatter_for(root, extraction) {
            renderer = renderer.with_frontmatter(frontmatter);
        }
        renderer.write_tree(&extraction.model, out)
    }

    /// Execute a search against the tree at `root` and return the matched items along with
    /// stubs restricted to them.
    pub fn search(&self, root: &Path, options: &SearchOptions) -> Result<SearchResponse> {
        let extraction = self.inspect(root)?;
        self.search_extraction(root, &extraction, options)
    }

    /// Execute a search against an extraction of the tree at `root`.
    ///
    /// Only the matched items and their enclosing types are emitted in the rendered stubs.
    pub fn search_extraction(
        &self,
        root: &Path,
        extraction: &Extraction,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let index = SearchIndex::build(&extraction.model);
        let results = index.search(options);

        if results.is_empty() {
            return Ok(SearchResponse {
                results,
                rendered: String::new(),
            });
        }

        let selection = build_render_selection(&index, &results, options.expand_containers);
        let mut renderer = Renderer::default()
            .with_comments(self.comments)
            .with_selection(selection);
        if let Some(frontmatter) = self.frontmatter_for(root, extraction) {
            let hits = results
                .iter()
                .map(|result| FrontmatterHit {
                    path: result.path_string.clone(),
                    domains: result.matched,
                })
                .collect();
            let search_meta = FrontmatterSearch {
                query: options.query.clone(),
                domains: options.domains,
                case_sensitive: options.case_sensitive,
                expand_containers: options.expand_containers,
                hits,
            };
            renderer = renderer.with_frontmatter(frontmatter.with_search(search_meta));
        }
        let rendered = renderer.render(&extraction.model)?;

        Ok(SearchResponse { results, rendered })
    }

    /// Produce a lightweight listing of the tree at `root`, optionally filtered by a search
    /// query.
    pub fn list(&self, root: &Path, search: Option<&SearchOptions>) -> Result<Vec<ListItem>> {
        let extraction = self.inspect(root)?;
        Ok(self.list_extraction(&extraction, search))
    }

    /// Produce a lightweight listing of an extraction.
    pub fn list_extraction(
        &self,
        extraction: &Extraction,
        search: Option<&SearchOptions>,
    ) -> Vec<ListItem> {
        let index = SearchIndex::build(&extraction.model);
        match search {
            Some(options) => index
                .search(options)
                .into_iter()
                .map(|result| ListItem {
                    kind: result.kind,
                    path: result.path_string,
                })
                .collect(),
            None => index
                .entries()
                .iter()
                .map(|entry| ListItem {
                    kind: entry.kind,
                    path: entry.path_string.clone(),
                })
                .collect(),
        }
    }

    /// Returns a pretty-printed JSON rendition of the extraction of the tree at `root`.
    pub fn raw_json(&self, root: &Path) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.inspect(root)?)?)
    }

    /// Structurally pair the packages and types of two documentation trees.
    pub fn correspond(&self, left: &Path, right: &Path) -> Result<Correspondence> {
        let left_model = self.inspect(left)?.model;
        let right_model = self.inspect(right)?.model;
        match_models(&left_model, &right_model).ok_or_else(|| {
            DocskelError::NoMatch(left.display().to_string(), right.display().to_string())
        })
    }

    fn frontmatter_for(&self, root: &Path, extraction: &Extraction) -> Option<FrontmatterConfig> {
        self.frontmatter.then(|| {
            FrontmatterConfig::for_root(root.display().to_string())
                .with_format(extraction.format.name(), extraction.generator.clone())
                .with_filter(self.filter.clone())
        })
    }
}

/// The tree root for a path naming either the root directory or a file inside it.
fn tree_root(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        path.to_path_buf()
    }
}
