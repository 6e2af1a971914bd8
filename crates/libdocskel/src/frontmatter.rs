use crate::search::{SearchDomain, describe_domains};

/// Configuration describing optional frontmatter comments rendered ahead of stub output.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterConfig {
    /// Whether the frontmatter should be rendered.
    pub enabled: bool,
    /// Documentation root requested by the user.
    pub root: Option<String>,
    /// Layout family the tree was read with.
    pub format: Option<String>,
    /// Generator version text found in the tree.
    pub generator: Option<String>,
    /// Type-name filter applied during extraction.
    pub filter: Option<String>,
    /// Optional metadata for search-driven renders.
    pub search: Option<FrontmatterSearch>,
}

impl FrontmatterConfig {
    /// Create a configuration with frontmatter enabled for the provided documentation root.
    pub fn for_root(root: impl Into<String>) -> Self {
        Self {
            enabled: true,
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Disable frontmatter rendering entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Attach the layout family and generator version of the tree.
    pub fn with_format(mut self, format: impl Into<String>, generator: Option<String>) -> Self {
        self.format = Some(format.into());
        self.generator = generator;
        self
    }

    /// Attach the type-name filter used for extraction.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Attach search metadata summarising the invocation.
    pub fn with_search(mut self, search: FrontmatterSearch) -> Self {
        self.search = Some(search);
        self
    }

    /// Render the configured frontmatter when enabled, returning the formatted comment block.
    pub fn render(&self, comments: bool) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let mut output = String::new();
        output.push_str("// docskel stubs - API reconstructed from javadoc HTML, bodies omitted.\n");

        let mut settings = Vec::new();
        if let Some(root) = &self.root {
            settings.push(format!("root={root}"));
        }
        if let Some(format) = &self.format {
            settings.push(format!("format={format}"));
        }
        if let Some(generator) = &self.generator {
            settings.push(format!("generator={generator}"));
        }
        if let Some(filter) = &self.filter
            && !filter.is_empty()
        {
            settings.push(format!("filter={filter}"));
        }
        settings.push(format!("comments={comments}"));

        output.push_str(&format!("// settings: {}\n", settings.join(", ")));

        if let Some(search) = &self.search {
            output.push('\n');
            write_search_section(&mut output, search);
        }
        output.push('\n');

        Some(output)
    }
}

/// Summary of a search invocation attached to the frontmatter.
#[derive(Debug, Clone)]
pub struct FrontmatterSearch {
    /// Query string executed against the index.
    pub query: String,
    /// Domains evaluated during matching.
    pub domains: SearchDomain,
    /// Whether matching respected case sensitivity.
    pub case_sensitive: bool,
    /// Whether matched types were expanded to include all their members.
    pub expand_containers: bool,
    /// Matched items included in the rendered stubs.
    pub hits: Vec<FrontmatterHit>,
}

/// Individual search hit included in the frontmatter summary.
#[derive(Debug, Clone)]
pub struct FrontmatterHit {
    /// Path of the matched item.
    pub path: String,
    /// Domains that contributed to the match.
    pub domains: SearchDomain,
}

fn write_search_section(buffer: &mut String, search: &FrontmatterSearch) {
    let mut details = vec![format!("case_sensitive={}", search.case_sensitive)];
    let domains = describe_domains(search.domains);
    if !domains.is_empty() {
        details.push(format!("domains={}", domains.join(", ")));
    }
    details.push(format!("expand_containers={}", search.expand_containers));

    buffer.push_str(&format!(
        "// search: query=\"{}\"; {}\n",
        search.query,
        details.join("; ")
    ));

    if search.hits.is_empty() {
        return;
    }

    buffer.push_str(&format!("// hits ({}):\n", search.hits.len()));
    for hit in &search.hits {
        let labels = describe_domains(hit.domains);
        if labels.is_empty() {
            buffer.push_str(&format!("//   - {}\n", hit.path));
        } else {
            buffer.push_str(&format!("//   - {} [{}]\n", hit.path, labels.join(", ")));
        }
    }
}
