//! Non-fatal outcomes of an extraction run.

use std::{
    collections::HashSet,
    fmt,
    path::PathBuf,
};

use serde::Serialize;
use tracing::warn;

/// A recoverable condition noticed while extracting the documentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A link pointed outside the built-in and configured documentation roots.
    UnresolvedLink {
        /// The link as written in the page.
        link: String,
        /// The type whose page contained the link.
        context: String,
    },
    /// A short type name could not be qualified and was kept as written.
    NameResolutionFallback {
        /// The name as written.
        name: String,
        /// The type being extracted when the name was seen.
        context: String,
    },
    /// A detail block (or constant value) names no member known from the summary.
    MemberDetailOrphan {
        /// Owning type.
        type_name: String,
        /// Member name or signature from the detail block.
        member: String,
    },
    /// A constant literal did not parse as its declared type; the raw text was kept.
    MalformedConstantLiteral {
        /// Declared type of the constant.
        declared_type: String,
        /// The literal as shown in the documentation.
        literal: String,
    },
    /// A constant was declared with a type that has no literal form.
    UnknownConstantType {
        /// Declared type of the constant.
        declared_type: String,
        /// The literal as shown in the documentation.
        literal: String,
    },
    /// The tree has no constant values page.
    MissingConstantsPage {
        /// Path that was probed.
        path: PathBuf,
    },
    /// A supertype chain looped back onto itself and was cut.
    SupertypeCycle {
        /// The type whose supertype was reset.
        type_name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLink { link, context } => {
                write!(f, "unresolved link {link} in {context}")
            }
            Self::NameResolutionFallback { name, context } => {
                write!(f, "could not resolve type name {name} in {context}")
            }
            Self::MemberDetailOrphan { type_name, member } => {
                write!(f, "no summary member matches {member} in {type_name}")
            }
            Self::MalformedConstantLiteral {
                declared_type,
                literal,
            } => write!(f, "malformed {declared_type} literal {literal}"),
            Self::UnknownConstantType {
                declared_type,
                literal,
            } => write!(f, "constant {literal} has unsupported type {declared_type}"),
            Self::MissingConstantsPage { path } => {
                write!(f, "no constant values page at {}", path.display())
            }
            Self::SupertypeCycle { type_name } => {
                write!(f, "supertype cycle through {type_name}")
            }
        }
    }
}

/// A type whose extraction stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeFailure {
    /// Canonical name of the type.
    pub type_name: String,
    /// Human-readable cause.
    pub cause: String,
}

/// Failures and warnings accumulated over a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Types whose extraction failed, in processing order.
    pub failures: Vec<TypeFailure>,
    /// Distinct warnings, in the order first seen.
    pub warnings: Vec<Warning>,
    #[serde(skip)]
    seen: HashSet<Warning>,
}

impl Report {
    /// Record a warning, logging it the first time it is seen.
    pub fn warn(&mut self, warning: Warning) {
        if self.seen.insert(warning.clone()) {
            warn!("{warning}");
            self.warnings.push(warning);
        }
    }

    /// Record a failed type.
    pub fn fail(&mut self, type_name: impl Into<String>, cause: impl fmt::Display) {
        let failure = TypeFailure {
            type_name: type_name.into(),
            cause: cause.to_string(),
        };
        warn!("failed to extract {}: {}", failure.type_name, failure.cause);
        self.failures.push(failure);
    }

    /// True when nothing failed and nothing was worth warning about.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty()
    }

    /// Names of every failed type.
    pub fn failed_types(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.type_name.as_str()).collect()
    }

    /// Multi-line summary suitable for printing after a run.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} type(s) failed, {} warning(s)\n",
            self.failures.len(),
            self.warnings.len()
        );
        for failure in &self.failures {
            out.push_str(&format!("  {}: {}\n", failure.type_name, failure.cause));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_warnings_are_recorded_once() {
        let mut report = Report::default();
        let warning = Warning::NameResolutionFallback {
            name: "Foo".into(),
            context: "p.A".into(),
        };
        report.warn(warning.clone());
        report.warn(warning);
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn summary_lists_failures() {
        let mut report = Report::default();
        report.fail("p.Broken", "no type header");
        assert_eq!(report.failed_types(), vec!["p.Broken"]);
        assert_eq!(
            report.summary(),
            "1 type(s) failed, 0 warning(s)\n  p.Broken: no type header\n"
        );
    }
}
