//! Generator 12: the all-types index becomes `allclasses-index.html`.

use super::{Behaviors, Format};

pub(super) fn apply(base: Behaviors) -> Behaviors {
    Behaviors {
        format: Format::Jdk12,
        index_pages: &[
            "allclasses-index.html",
            "allclasses.html",
            "allclasses-noframe.html",
        ],
        ..base
    }
}
