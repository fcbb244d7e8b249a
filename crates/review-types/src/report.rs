use crate::types::{Category, IssueRecord};
use std::collections::BTreeMap;

/// Review report: every category mapped to its records in insertion order.
///
/// All categories are present from construction so consumers can rely on a
/// stable key set; the map is ordered by [`Category`] declaration order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Report {
    categories: BTreeMap<Category, Vec<IssueRecord>>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            categories: Category::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        }
    }

    pub fn push(&mut self, category: Category, record: IssueRecord) {
        self.categories.entry(category).or_default().push(record);
    }

    pub fn records(&self, category: Category) -> &[IssueRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append all records of `other`, category by category
    pub fn merge(&mut self, other: Report) {
        for (category, records) in other.categories {
            self.categories.entry(category).or_default().extend(records);
        }
    }

    pub fn counts(&self) -> Vec<(Category, usize)> {
        self.categories
            .iter()
            .map(|(category, records)| (*category, records.len()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn applied_fixes(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .filter(|record| record.is_applied_fix())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}
