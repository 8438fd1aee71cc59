use std::collections::BTreeMap;

use crate::animation::reveal::reveal_quantity;
use crate::foundation::core::Point;
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::foundation::format::NumberFormat;

/// Gap in points between a bar end and its value label.
const VALUE_LABEL_GAP_PTS: f64 = 8.0;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BarRow {
    pub category: String,
    pub value: f64,
}

/// Horizontal bar chart. Bars grow from zero, value labels track the bar end.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BarChart {
    pub rows: Vec<BarRow>,
    #[serde(default)]
    pub format: NumberFormat,
    /// Extra label offset in points, keyed by row index.
    #[serde(default)]
    pub label_offsets: BTreeMap<usize, f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BarState {
    pub index: usize,
    pub category: String,
    pub width: f64,
    pub value_label: String,
    /// Bar end, in data units (`x`) and row units (`y`).
    pub label_anchor: Point,
    /// Signed horizontal label offset in points; negative bars put labels on the left.
    pub label_offset_pts: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BarFrame {
    pub bars: Vec<BarState>,
}

impl BarChart {
    pub fn validate(&self) -> EspressoResult<()> {
        if self.rows.is_empty() {
            return Err(EspressoError::validation("bar chart needs at least one row"));
        }
        if let Some(row) = self.rows.iter().find(|r| !r.value.is_finite()) {
            return Err(EspressoError::validation(format!(
                "bar chart value for '{}' must be finite",
                row.category
            )));
        }
        Ok(())
    }

    pub fn evaluate(&self, progress: f64) -> BarFrame {
        let bars = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let width = reveal_quantity(row.value, progress);
                let extra = self.label_offsets.get(&index).copied().unwrap_or(0.0);
                let label_offset_pts = if row.value >= 0.0 {
                    VALUE_LABEL_GAP_PTS + extra
                } else {
                    -VALUE_LABEL_GAP_PTS - extra
                };
                BarState {
                    index,
                    category: row.category.clone(),
                    width,
                    value_label: self.format.format(width),
                    label_anchor: Point::new(width, index as f64),
                    label_offset_pts,
                }
            })
            .collect();
        BarFrame { bars }
    }
}
