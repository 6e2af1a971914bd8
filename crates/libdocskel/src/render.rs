use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::Result,
    frontmatter::FrontmatterConfig,
    javautils::{
        docs, field_initializer, is_bodiless, member_path, render_field_signature,
        render_method_signature, render_type_header,
    },
    model::{Method, Model, Modifiers, TypeDef, TypeKind},
};

/// Indentation unit of rendered source.
const INDENT: &str = "    ";

/// Body of every rendered method and constructor.
const STUB_BODY: &str = "throw new UnsupportedOperationException();";

/// The subset of a model to render, as produced by a search.
#[derive(Debug, Clone, Default)]
pub struct RenderSelection {
    /// Paths of matched items.
    matches: HashSet<String>,
    /// Types rendered at all, for their own sake or as enclosing context.
    context: HashSet<String>,
    /// Types rendered with every member.
    expanded: HashSet<String>,
}

impl RenderSelection {
    /// Create a selection from matched paths, context types and expanded types.
    pub fn new(
        matches: HashSet<String>,
        context: HashSet<String>,
        expanded: HashSet<String>,
    ) -> Self {
        Self {
            matches,
            context,
            expanded,
        }
    }

    /// Whether the type `name` appears in the output.
    pub fn renders_type(&self, name: &str) -> bool {
        self.context.contains(name)
    }

    /// Whether the member at `path` of type `owner` appears in the output.
    pub fn renders_member(&self, owner: &str, path: &str) -> bool {
        self.expanded.contains(owner) || self.matches.contains(path)
    }
}

/// Renders a model as Java source stubs.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Whether to emit comments as Javadoc blocks.
    comments: bool,
    /// Header comment describing the run.
    frontmatter: Option<FrontmatterConfig>,
    /// Restricts output to part of the model.
    selection: Option<RenderSelection>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer that emits comments and no frontmatter.
    pub fn new() -> Self {
        Self {
            comments: true,
            frontmatter: None,
            selection: None,
        }
    }

    /// Enables or disables Javadoc comments in the output.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Emit the given frontmatter ahead of the output.
    pub fn with_frontmatter(mut self, frontmatter: FrontmatterConfig) -> Self {
        self.frontmatter = Some(frontmatter);
        self
    }

    /// Restrict output to a selection.
    pub fn with_selection(mut self, selection: RenderSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Render every selected top-level type as one compilation unit, packages in name order.
    pub fn render(&self, model: &Model) -> Result<String> {
        let mut output = self.frontmatter().unwrap_or_default();
        let units: Vec<String> = self
            .top_level(model)
            .map(|ty| self.render_unit(model, ty))
            .collect();
        output.push_str(&units.join("\n"));
        Ok(output)
    }

    /// Write one `.java` file per selected top-level type under `dir`, returning the written
    /// paths.
    pub fn write_tree(&self, model: &Model, dir: &Path) -> Result<Vec<PathBuf>> {
        let header = self.frontmatter().unwrap_or_default();
        let mut written = Vec::new();
        for ty in self.top_level(model) {
            let mut path = dir.to_path_buf();
            path.extend(ty.package.split('.').filter(|s| !s.is_empty()));
            fs::create_dir_all(&path)?;
            path.push(format!("{}.java", ty.simple_name()));
            fs::write(&path, format!("{header}{}", self.render_unit(model, ty)))?;
            debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn frontmatter(&self) -> Option<String> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.render(self.comments))
    }

    fn top_level<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a TypeDef> + 'a {
        model
            .packages
            .values()
            .flat_map(|pkg| pkg.types.iter())
            .filter_map(|name| model.get(name))
            .filter(|ty| self.selects_type(&ty.name))
    }

    fn selects_type(&self, name: &str) -> bool {
        self.selection
            .as_ref()
            .is_none_or(|s| s.renders_type(name))
    }

    fn selects_member(&self, owner: &str, key: &str) -> bool {
        self.selection
            .as_ref()
            .is_none_or(|s| s.renders_member(owner, &member_path(owner, key)))
    }

    fn render_unit(&self, model: &Model, ty: &TypeDef) -> String {
        let mut output = String::new();
        if !ty.package.is_empty() {
            output.push_str(&format!("package {};\n\n", ty.package));
        }
        output.push_str(&self.render_type(model, ty, ""));
        output
    }

    fn render_type(&self, model: &Model, ty: &TypeDef, indent: &str) -> String {
        let inner = format!("{indent}{INDENT}");
        let mut output = self.docs(&ty.comment, indent);
        output.push_str(&format!("{indent}{} {{\n", render_type_header(ty)));

        let mut blocks: Vec<String> = Vec::new();
        if ty.kind == TypeKind::Enum {
            let constants: Vec<String> = ty
                .enum_constants
                .iter()
                .filter(|c| self.selects_member(&ty.name, &c.name))
                .map(|c| format!("{}{inner}{}", self.docs(&c.comment, &inner), c.name))
                .collect();
            blocks.push(format!("{};\n", constants.join(",\n")));
        }
        for field in ty
            .fields
            .iter()
            .filter(|f| self.selects_member(&ty.name, &f.name))
        {
            let init = field_initializer(ty.kind, field)
                .map(|v| format!(" = {v}"))
                .unwrap_or_default();
            blocks.push(format!(
                "{}{inner}{}{init};\n",
                self.docs(&field.comment, &inner),
                render_field_signature(field)
            ));
        }
        for ctor in ty
            .constructors
            .iter()
            .filter(|c| self.selects_member(&ty.name, &c.key()))
        {
            blocks.push(self.render_method(ty, &enum_safe(ty, ctor), &inner));
        }
        for method in ty
            .methods
            .iter()
            .filter(|m| !is_implicit_enum_method(ty, m))
            .filter(|m| self.selects_member(&ty.name, &m.key()))
        {
            blocks.push(self.render_method(ty, method, &inner));
        }
        for nested in ty
            .nested
            .iter()
            .filter_map(|n| model.get(n))
            .filter(|n| self.selects_type(&n.name))
        {
            blocks.push(self.render_type(model, nested, &inner));
        }

        output.push_str(&blocks.join("\n"));
        output.push_str(&format!("{indent}}}\n"));
        output
    }

    fn render_method(&self, owner: &TypeDef, method: &Method, indent: &str) -> String {
        let mut output = self.docs(&method.comment, indent);
        output.push_str(indent);
        output.push_str(&render_method_signature(method));
        if owner.kind == TypeKind::Annotation {
            if let Some(default) = &method.default_value {
                output.push_str(&format!(" default {default}"));
            }
            output.push_str(";\n");
        } else if is_bodiless(owner.kind, method) {
            output.push_str(";\n");
        } else {
            output.push_str(&format!(" {{\n{indent}{INDENT}{STUB_BODY}\n{indent}}}\n"));
        }
        output
    }

    fn docs(&self, comment: &[String], indent: &str) -> String {
        if self.comments {
            docs(comment, indent)
        } else {
            String::new()
        }
    }
}

/// Enum constructors cannot be public or protected.
fn enum_safe(owner: &TypeDef, ctor: &Method) -> Method {
    let mut ctor = ctor.clone();
    if owner.kind == TypeKind::Enum {
        ctor.modifiers
            .remove(Modifiers::PUBLIC | Modifiers::PROTECTED);
    }
    ctor
}

/// `values()` and `valueOf(String)` are documented on every enum but generated by the compiler.
fn is_implicit_enum_method(owner: &TypeDef, method: &Method) -> bool {
    owner.kind == TypeKind::Enum
        && matches!(
            method.key().as_str(),
            "values()" | "valueOf(java.lang.String)"
        )
}
