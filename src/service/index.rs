use std::collections::HashMap;

use crate::models::{fields, RawRecord};
use crate::upstream::SourceData;

/// key -> row for one reference collection
pub type ReferenceIndex = HashMap<String, RawRecord>;

/// Indexes `records` by `key_field`
///
/// Later rows replace earlier rows with the same key. Rows without a key
/// are skipped.
pub fn build_index(records: &[RawRecord], key_field: &str) -> ReferenceIndex {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(key) = record.text(key_field) {
            index.insert(key, record.clone());
        }
    }
    index
}

/// Lookup tables for the four reference collections
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndexes {
    pub salesmen: ReferenceIndex,
    pub divisions: ReferenceIndex,
    pub customers: ReferenceIndex,
    pub branches: ReferenceIndex,
}

impl ReferenceIndexes {
    pub fn build(data: &SourceData) -> Self {
        Self {
            salesmen: build_index(data.salesmen.records(), fields::salesman::ID),
            divisions: build_index(data.divisions.records(), fields::division::ID),
            customers: build_index(data.customers.records(), fields::customer::CODE),
            branches: build_index(data.branches.records(), fields::branch::ID),
        }
    }
}
