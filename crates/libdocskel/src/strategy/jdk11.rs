//! Generator 11: the header keyword moves into the `title` attribute and the frameless
//! `allclasses.html` index appears.

use super::{Behaviors, Format, jdk8, kind_from_header};
use crate::{html::Page, model::TypeKind};

pub(super) fn apply(base: Behaviors) -> Behaviors {
    Behaviors {
        format: Format::Jdk11,
        index_pages: &[
            "allclasses.html",
            "allclasses-noframe.html",
            "allclasses-frame.html",
        ],
        classify,
        ..base
    }
}

/// `<h2 title="Interface A" class="title">`.
pub(super) fn classify(page: &Page) -> Option<TypeKind> {
    page.select("h2[title]")
        .into_iter()
        .find_map(|h2| h2.attr("title").and_then(kind_from_header))
        .or_else(|| jdk8::classify(page))
}
