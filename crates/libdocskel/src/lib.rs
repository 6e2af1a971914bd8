//! Reconstruct the API of a class library from its generated javadoc HTML.
//!
//! [`Extractor`] reads a documentation tree of any supported generator release into a
//! version-independent [`Model`] of packages, types and members. [`Docskel`] wraps it with the
//! usual outputs: Java source stubs, search, listings, JSON and structural matching.

mod constants;
mod docskel;
mod error;
mod extractor;
mod filter;
mod frontmatter;
mod highlight;
mod html;
mod javautils;
mod keywords;
mod links;
mod matcher;
mod model;
mod names;
mod render;
mod report;
mod search;
mod strategy;
mod tokenizer;

pub use crate::{
    constants::{CONSTANTS_PAGE, extract_constant_value},
    docskel::Docskel,
    error::{DocskelError, Result},
    extractor::{Extraction, Extractor, Progress},
    filter::Filter,
    frontmatter::{FrontmatterConfig, FrontmatterHit, FrontmatterSearch},
    highlight::{DEFAULT_THEME, Highlighter},
    links::LinkResolver,
    matcher::{Correspondence, match_models},
    model::{
        ConstValue, EnumConst, Field, Method, Model, Modifiers, Package, Param, Stage, TypeDef,
        TypeKind, TypeRef,
    },
    names::{Enclosing, NameResolver, Resolution},
    render::{RenderSelection, Renderer},
    report::{Report, TypeFailure, Warning},
    search::{
        ListItem, SearchDomain, SearchIndex, SearchItemKind, SearchOptions, SearchResponse,
        SearchResult, describe_domains,
    },
    strategy::{Format, parse_version},
    tokenizer::{depth_after, split},
};
