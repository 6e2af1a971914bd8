//! Structural correspondence between the package trees of two models.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::model::Model;

/// Package and type pairs from a left model to a right model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Correspondence {
    /// Left package name to right package name, including the root pair.
    pub packages: BTreeMap<String, String>,
    /// Left type name to right type name, for top-level types of paired packages that share a
    /// simple name.
    pub types: BTreeMap<String, String>,
}

impl Correspondence {
    /// The right-hand package paired with `left`.
    pub fn package(&self, left: &str) -> Option<&str> {
        self.packages.get(left).map(String::as_str)
    }

    /// The right-hand type paired with `left`.
    pub fn type_name(&self, left: &str) -> Option<&str> {
        self.types.get(left).map(String::as_str)
    }
}

/// Pair the package trees of two linked models, starting at their roots.
///
/// A package matches a candidate when each of its sub-packages can be matched to a distinct
/// sub-package of the candidate. Candidates are tried in name order; a failed attempt undoes every
/// pair it added. Returns `None` when the roots do not match.
pub fn match_models(left: &Model, right: &Model) -> Option<Correspondence> {
    let mut packages = BTreeMap::new();
    if !match_package(left, "", right, "", &mut packages) {
        debug!("no package correspondence");
        return None;
    }
    packages.insert(String::new(), String::new());
    let types = pair_types(left, right, &packages);
    Some(Correspondence { packages, types })
}

fn match_package(
    left: &Model,
    lname: &str,
    right: &Model,
    rname: &str,
    pairs: &mut BTreeMap<String, String>,
) -> bool {
    let (Some(lpkg), Some(rpkg)) = (left.package(lname), right.package(rname)) else {
        return false;
    };
    let mut used: HashSet<&str> = HashSet::new();
    for lchild in &lpkg.children {
        let mut found = false;
        for rchild in &rpkg.children {
            if used.contains(rchild.as_str()) {
                continue;
            }
            let snapshot = pairs.clone();
            if match_package(left, lchild, right, rchild, pairs) {
                pairs.insert(lchild.clone(), rchild.clone());
                used.insert(rchild);
                found = true;
                break;
            }
            *pairs = snapshot;
        }
        if !found {
            return false;
        }
    }
    true
}

fn pair_types(
    left: &Model,
    right: &Model,
    packages: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut types = BTreeMap::new();
    for (lname, rname) in packages {
        let (Some(lpkg), Some(rpkg)) = (left.package(lname), right.package(rname)) else {
            continue;
        };
        for lty in lpkg.types.iter().filter_map(|n| left.get(n)) {
            if let Some(rty) = rpkg
                .types
                .iter()
                .filter_map(|n| right.get(n))
                .find(|r| r.simple_name() == lty.simple_name())
            {
                types.insert(lty.name.clone(), rty.name.clone());
            }
        }
    }
    types
}
