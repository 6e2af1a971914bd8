//! Generators 8 to 10: lower-case markup, dotted anchors inside `li.blockList` containers.

use scraper::ElementRef;

use super::{Behaviors, Format, Region, Section, kind_from_header, legacy};
use crate::{
    html::{self, Page},
    model::TypeKind,
};

pub(super) fn apply(base: Behaviors) -> Behaviors {
    Behaviors {
        format: Format::Jdk8,
        classify,
        declaration,
        section,
        ..base
    }
}

/// `<div class="header"><h2 class="title">Interface A</h2>`.
pub(super) fn classify(page: &Page) -> Option<TypeKind> {
    page.first(".header h2.title")
        .and_then(|h2| kind_from_header(&html::text_of(h2)))
        .or_else(|| legacy::classify(page))
}

/// The `pre` inside the description block.
pub(super) fn declaration(page: &Page) -> Option<ElementRef<'_>> {
    page.first("div.description pre")
        .or_else(|| legacy::declaration(page))
}

pub(super) fn section(page: &Page, section: Section) -> Option<Region<'_>> {
    let key = section.dotted_key();
    match page.find_by_anchor(&[key.as_str()]) {
        Some(anchor) => Some(Region::from_anchor(anchor, section.is_summary())),
        None => legacy::section(page, section),
    }
}
