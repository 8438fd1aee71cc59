use std::collections::BTreeMap;

use crate::animation::reveal::reveal_quantity;
use crate::foundation::core::Point;
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::foundation::format::NumberFormat;

const VALUE_LABEL_GAP_PTS: f64 = 6.0;

fn default_offset() -> f64 {
    0.1
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StemRow {
    pub category: String,
    pub a: f64,
    /// Second series, drawn to the right of `a`.
    #[serde(default)]
    pub b: Option<f64>,
    /// Explicit x position; defaults to the row index.
    #[serde(default)]
    pub position: Option<f64>,
}

/// Lollipop chart with one or two paired series.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StemChart {
    pub rows: Vec<StemRow>,
    /// Horizontal distance of each stem from its category position.
    #[serde(default = "default_offset")]
    pub offset: f64,
    #[serde(default)]
    pub format: NumberFormat,
    /// Extra label distance in points per row index, applied to both of the row's stems.
    #[serde(default)]
    pub label_offsets: BTreeMap<usize, f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StemSeries {
    A,
    B,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StemState {
    pub series: StemSeries,
    pub index: usize,
    pub x: f64,
    pub height: f64,
    /// Marker at the stem top; the value label is anchored here too.
    pub marker: Point,
    pub label: String,
    /// Vertical label distance from the marker in points; negative places it below.
    pub label_offset_pts: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StemFrame {
    pub stems: Vec<StemState>,
}

impl StemChart {
    pub fn validate(&self) -> EspressoResult<()> {
        if self.rows.is_empty() {
            return Err(EspressoError::validation("stem chart needs at least one row"));
        }
        let with_b = self.rows.iter().filter(|r| r.b.is_some()).count();
        if with_b != 0 && with_b != self.rows.len() {
            return Err(EspressoError::validation(
                "stem chart series 'b' must be set on every row or on none",
            ));
        }
        for r in &self.rows {
            let finite = r.a.is_finite()
                && r.b.is_none_or(f64::is_finite)
                && r.position.is_none_or(f64::is_finite);
            if !finite {
                return Err(EspressoError::validation(format!(
                    "stem chart row '{}' has non-finite values",
                    r.category
                )));
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, progress: f64) -> StemFrame {
        let mut stems = Vec::with_capacity(self.rows.len() * 2);
        let mut push = |series, index, x: f64, value: f64| {
            let height = reveal_quantity(value, progress);
            let gap = if value >= 0.0 {
                VALUE_LABEL_GAP_PTS
            } else {
                -VALUE_LABEL_GAP_PTS
            };
            let extra = self.label_offsets.get(&index).copied().unwrap_or(0.0);
            stems.push(StemState {
                series,
                index,
                x,
                height,
                marker: Point::new(x, height),
                label: self.format.format(height),
                label_offset_pts: gap + extra,
            });
        };

        for (i, row) in self.rows.iter().enumerate() {
            let pos = row.position.unwrap_or(i as f64);
            push(StemSeries::A, i, pos - self.offset, row.a);
        }
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(b) = row.b {
                let pos = row.position.unwrap_or(i as f64);
                push(StemSeries::B, i, pos + self.offset, b);
            }
        }
        StemFrame { stems }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(with_b: bool) -> StemChart {
        StemChart {
            rows: vec![
                StemRow {
                    category: "Q1".to_owned(),
                    a: 100.0,
                    b: with_b.then_some(80.0),
                    position: None,
                },
                StemRow {
                    category: "Q2".to_owned(),
                    a: -40.0,
                    b: with_b.then_some(60.0),
                    position: Some(3.0),
                },
            ],
            offset: 0.1,
            format: NumberFormat::new("{:.0f}", 10.0),
            label_offsets: BTreeMap::new(),
        }
    }

    #[test]
    fn stems_grow_and_label_current_height() {
        let f = chart(false).evaluate(0.5);
        assert_eq!(f.stems.len(), 2);
        assert_eq!(f.stems[0].height, 50.0);
        assert_eq!(f.stems[0].label, "5");
        assert_eq!(f.stems[0].marker, Point::new(-0.1, 50.0));
        assert_eq!(f.stems[1].height, -20.0);
        assert_eq!(f.stems[1].x, 2.9);
    }

    #[test]
    fn paired_series_sit_on_both_sides() {
        let f = chart(true).evaluate(1.0);
        assert_eq!(f.stems.len(), 4);
        let b: Vec<_> = f
            .stems
            .iter()
            .filter(|s| s.series == StemSeries::B)
            .collect();
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].x, 0.1);
        assert_eq!(b[1].x, 3.1);
        assert_eq!(b[1].height, 60.0);
    }

    #[test]
    fn labels_sit_below_negative_stems() {
        let mut c = chart(true);
        c.label_offsets.insert(1, 3.0);
        let f = c.evaluate(0.0);
        let offsets: Vec<f64> = f.stems.iter().map(|s| s.label_offset_pts).collect();
        // A: Q1, Q2 (negative), then B: Q1, Q2.
        assert_eq!(offsets, [6.0, -3.0, 6.0, 9.0]);
    }

    #[test]
    fn mixed_b_series_is_rejected() {
        let mut c = chart(true);
        c.rows[1].b = None;
        assert!(c.validate().is_err());
        assert!(chart(true).validate().is_ok());
        assert!(chart(false).validate().is_ok());
    }
}
