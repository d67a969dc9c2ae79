//! RFM segmentation records and segment distribution.

use std::collections::HashMap;

use crate::domain::sales::PREVIEW_ROWS;

/// One customer row from the precomputed RFM export.
///
/// One row per customer is assumed but not enforced; duplicates are counted
/// as supplied.
#[derive(Debug, Clone)]
pub struct SegmentationRecord {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: i64,
    pub monetary: f64,
    pub segment: String,
}

/// A pie-chart wedge: segment label, customer count, share of the total.
#[derive(Debug, Clone)]
pub struct SegmentSlice {
    pub label: String,
    pub count: usize,
    /// Percentage of all records, 0.0 to 100.0.
    pub share: f64,
}

/// Customer count per distinct segment label, descending by count.
///
/// Ties keep first-seen order, matching the label-frequency ordering of the
/// upstream export.
pub fn segment_distribution(records: &[SegmentationRecord]) -> Vec<SegmentSlice> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in records {
        match index.get(record.segment.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(record.segment.as_str(), counts.len());
                counts.push((record.segment.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len();
    counts
        .into_iter()
        .map(|(label, count)| SegmentSlice {
            label,
            count,
            share: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Everything the segmentation view renders.
#[derive(Debug, Clone)]
pub struct SegmentationView {
    pub total_customers: usize,
    pub preview: Vec<SegmentationRecord>,
    pub distribution: Vec<SegmentSlice>,
}

impl SegmentationView {
    pub fn from_records(records: &[SegmentationRecord]) -> Self {
        Self {
            total_customers: records.len(),
            preview: records.iter().take(PREVIEW_ROWS).cloned().collect(),
            distribution: segment_distribution(records),
        }
    }
}
