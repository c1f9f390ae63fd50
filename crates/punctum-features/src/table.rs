//! Feature table
//!
//! One row per spot, keyed by (Cell_ID, spot_id). Coordinates are stored as
//! typed fields; every other feature is a named `f64` column whose order is
//! fixed by [`feature_columns`].

use punctum_core::Zyx;
use punctum_stats::{DistributionMetric, EffectSizeMetric};
use serde::{Deserialize, Serialize};

/// Object key column
pub const CELL_ID_COL: &str = "Cell_ID";
/// Spot key column
pub const SPOT_ID_COL: &str = "spot_id";
/// Coordinates relative to the object's bounding box
pub const ZYX_LOCAL_COLS: [&str; 3] = ["z_local", "y_local", "x_local"];
/// Coordinates relative to the object's expanded crop
pub const ZYX_LOCAL_EXPANDED_COLS: [&str; 3] = ["z_local_expanded", "y_local_expanded", "x_local_expanded"];
/// Global coordinates
pub const ZYX_GLOBAL_COLS: [&str; 3] = ["z", "y", "x"];

/// Suffix of the per-channel spot metrics
pub const SPOT_VOLUME_SUFFIX: &str = "in_spot_minimumsize_vol";
/// Prefix of the spot-versus-background comparison columns
pub const SPOT_VS_BACKGROUND: &str = "spot_vs_backgr";

/// Image channels measured per spot, in column order
pub const CHANNELS: [&str; 3] = ["preproc", "sharp", "raw"];

/// Names of the feature columns, in the order values are stored in a row
pub fn feature_columns() -> Vec<String> {
    let mut cols: Vec<String> = DistributionMetric::ALL
        .iter()
        .map(|m| m.column_name("background", None))
        .collect();
    for channel in CHANNELS {
        let prefix = format!("spot_{}", channel);
        cols.push(format!("{}_intensity_at_center", prefix));
        cols.extend(
            DistributionMetric::ALL
                .iter()
                .map(|m| m.column_name(&prefix, Some(SPOT_VOLUME_SUFFIX))),
        );
    }
    cols.push(format!("{}_ttest_tstat", SPOT_VS_BACKGROUND));
    cols.push(format!("{}_ttest_pvalue", SPOT_VS_BACKGROUND));
    cols.extend(
        EffectSizeMetric::ALL
            .iter()
            .map(|m| format!("{}_effect_size_{}", SPOT_VS_BACKGROUND, m.name())),
    );
    cols
}

/// Features of one spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Label of the object holding the spot
    pub cell_id: u32,
    /// Spot identifier, strictly increasing over the table
    pub spot_id: usize,
    /// Position relative to the object's bounding box
    pub local: Zyx,
    /// Position relative to the object's expanded crop
    pub local_expanded: Zyx,
    /// Position in the input volume
    pub global: Zyx,
    /// Feature values, aligned with the table's columns
    pub values: Vec<f64>,
}

impl FeatureRow {
    fn coordinate(&self, name: &str) -> Option<f64> {
        let lookup = |cols: [&str; 3], p: Zyx| {
            cols.iter()
                .position(|c| *c == name)
                .map(|axis| p.to_array()[axis] as f64)
        };
        lookup(ZYX_LOCAL_COLS, self.local)
            .or_else(|| lookup(ZYX_LOCAL_EXPANDED_COLS, self.local_expanded))
            .or_else(|| lookup(ZYX_GLOBAL_COLS, self.global))
    }
}

/// Ordered concatenation of every object's spot rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureTable {
    /// Create an empty table with the standard feature columns
    pub fn new() -> Self {
        Self {
            columns: feature_columns(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_rows(rows: Vec<FeatureRow>) -> Self {
        Self {
            columns: feature_columns(),
            rows,
        }
    }

    /// Feature column names (coordinates and keys excluded)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in table order
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no spot was measured
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a feature column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Every value of a column in table order
    ///
    /// Accepts feature columns as well as the key and coordinate columns.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        if name == CELL_ID_COL {
            return Some(self.rows.iter().map(|r| r.cell_id as f64).collect());
        }
        if name == SPOT_ID_COL {
            return Some(self.rows.iter().map(|r| r.spot_id as f64).collect());
        }
        if let Some(idx) = self.column_index(name) {
            return Some(self.rows.iter().map(|r| r.values[idx]).collect());
        }
        let is_coordinate = ZYX_LOCAL_COLS
            .iter()
            .chain(&ZYX_LOCAL_EXPANDED_COLS)
            .chain(&ZYX_GLOBAL_COLS)
            .any(|c| *c == name);
        if !is_coordinate {
            return None;
        }
        self.rows.iter().map(|r| r.coordinate(name)).collect()
    }

    /// Row of spot `spot_id` in object `cell_id`
    pub fn row(&self, cell_id: u32, spot_id: usize) -> Option<&FeatureRow> {
        let idx = self.rows.binary_search_by_key(&spot_id, |r| r.spot_id).ok()?;
        let row = &self.rows[idx];
        (row.cell_id == cell_id).then_some(row)
    }

    /// Single value lookup
    pub fn value(&self, cell_id: u32, spot_id: usize, column: &str) -> Option<f64> {
        let row = self.row(cell_id, spot_id)?;
        match self.column_index(column) {
            Some(idx) => Some(row.values[idx]),
            None => row.coordinate(column),
        }
    }

    /// Rows of one object
    pub fn cell_rows(&self, cell_id: u32) -> impl Iterator<Item = &FeatureRow> + '_ {
        self.rows.iter().filter(move |r| r.cell_id == cell_id)
    }

    /// Distinct object labels in table order
    pub fn cell_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.rows.iter().map(|r| r.cell_id).collect();
        ids.dedup();
        ids
    }
}
