//! Record and monster builders shared by unit tests

use crate::classifier::{Classifier, Verdict};
use crate::transform::transform;
use bestiary_domain::{CanonicalMonster, RawRecord};

/// Minimal accepted record; `version` becomes the sub-page suffix
pub fn record(id: u32, name: &str, version: Option<&str>) -> RawRecord {
    let page_name_sub = match version {
        Some(v) => format!("{}#{}", name, v),
        None => name.to_string(),
    };
    RawRecord::default()
        .with("page_name", name)
        .with("page_name_sub", page_name_sub)
        .with("id", id)
        .with("hitpoints", 10)
}

/// Canonical monster built through the classifier and transformer
pub fn monster(id: u32, name: &str, version: Option<&str>) -> CanonicalMonster {
    let record = record(id, name, version);
    match Classifier::default().classify(&record) {
        Verdict::Accept(admission) => transform(&record, &admission, "test"),
        Verdict::Reject(rule) => panic!("fixture rejected by {}", rule),
    }
}
