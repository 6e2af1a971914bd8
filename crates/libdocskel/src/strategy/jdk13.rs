//! Generators 13 and later: `h1` headers, `section` containers, hyphenated ids and, from 16 on,
//! `div` grids instead of summary tables.

use scraper::ElementRef;

use super::{Behaviors, Format, Region, Section, SummaryRow, jdk8, jdk11, kind_from_header, legacy};
use crate::{
    html::{self, Page},
    model::TypeKind,
};

pub(super) fn apply(base: Behaviors) -> Behaviors {
    Behaviors {
        format: Format::Jdk13,
        classify,
        declaration,
        section,
        summary_rows,
        ..base
    }
}

pub(super) fn classify(page: &Page) -> Option<TypeKind> {
    page.first("h1.title")
        .and_then(|h1| {
            h1.attr("title")
                .and_then(kind_from_header)
                .or_else(|| kind_from_header(&html::text_of(h1)))
        })
        .or_else(|| jdk11::classify(page))
}

pub(super) fn declaration(page: &Page) -> Option<ElementRef<'_>> {
    page.first("div.typeSignature, div.type-signature")
        .or_else(|| jdk8::declaration(page))
}

/// Hyphenated anchors (`method-summary`), then section classes (`methodSummary`,
/// `method-details`), then the dotted anchors.
pub(super) fn section(page: &Page, section: Section) -> Option<Region<'_>> {
    let hyphenated = section.legacy_key().replace('_', "-");
    let interface = hyphenated.replace("annotation-type", "annotation-interface");
    if let Some(anchor) = page.find_by_anchor(&[hyphenated.as_str(), interface.as_str()]) {
        return Some(Region::from_anchor(anchor, section.is_summary()));
    }
    let classes = section_classes(section);
    let found = page.select("section").into_iter().find(|s| {
        let wanted: Vec<&str> = classes.iter().map(String::as_str).collect();
        html::has_any_class(*s, &wanted)
    });
    match found {
        Some(container) => Some(Region::single(container)),
        None => jdk8::section(page, section),
    }
}

/// Class names a section container may carry.
fn section_classes(section: Section) -> Vec<String> {
    let key = section.legacy_key();
    let plural = if section.is_summary() { "" } else { "s" };
    let camel: String = key
        .split('_')
        .enumerate()
        .map(|(idx, word)| {
            if idx == 0 {
                word.to_string()
            } else {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            }
        })
        .collect();
    let hyphen = key.replace('_', "-");
    vec![
        format!("{camel}{plural}"),
        format!("{hyphen}{plural}"),
        format!("{hyphen}{plural}").replace("annotation-type", "annotation-interface"),
    ]
}

/// Table rows as before, plus grid cells (`div.col-first`, `div.col-second`, ...) grouped into
/// rows that end at each `col-last` cell.
pub(super) fn summary_rows(region: &Region<'_>) -> Vec<SummaryRow> {
    let mut rows = legacy::summary_rows(region);
    let mut cells: Vec<ElementRef<'_>> = Vec::new();
    for cell in region.select("div[class*='col-']") {
        let classes: Vec<&str> = cell.value().classes().collect();
        if classes.contains(&"table-header") || !classes.iter().any(|c| c.starts_with("col-")) {
            continue;
        }
        cells.push(cell);
        if classes.contains(&"col-last") {
            rows.extend(SummaryRow::from_cells(&cells));
            cells.clear();
        }
    }
    rows.extend(SummaryRow::from_cells(&cells));
    rows
}
