//! Layout of generators before 8: upper-case markup, underscore anchors, flat sections.

use scraper::ElementRef;

use super::{Behaviors, Format, Region, Section, SummaryRow, kind_from_header};
use crate::{
    html::{self, Page},
    model::TypeKind,
};

/// The base behavior table every newer format overrides.
pub(super) fn behaviors() -> Behaviors {
    Behaviors {
        format: Format::Legacy,
        index_pages: &["allclasses-noframe.html", "allclasses-frame.html"],
        classify,
        declaration,
        section,
        summary_rows,
    }
}

/// The first `h2` carrying a kind keyword, e.g. `<H2><FONT>p</FONT><BR>Class A</H2>`.
pub(super) fn classify(page: &Page) -> Option<TypeKind> {
    page.select("h2")
        .into_iter()
        .find_map(|h2| kind_from_header(&html::text_of(h2)))
}

/// The definition list wrapping the `PRE` declaration.
pub(super) fn declaration(page: &Page) -> Option<ElementRef<'_>> {
    let pre = page.first("dl pre")?;
    html::closest(pre, "dl")
}

pub(super) fn section(page: &Page, section: Section) -> Option<Region<'_>> {
    let anchor = page.find_by_anchor(&[section.legacy_key()])?;
    Some(Region::from_anchor(anchor, section.is_summary()))
}

/// Table rows with at least one member link.
pub(super) fn summary_rows(region: &Region<'_>) -> Vec<SummaryRow> {
    region
        .select("tr")
        .into_iter()
        .filter_map(|tr| {
            let cells: Vec<ElementRef<'_>> = html::child_elements(tr)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .collect();
            SummaryRow::from_cells(&cells)
        })
        .collect()
}
