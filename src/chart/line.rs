use crate::animation::reveal::RevealCursor;
use crate::foundation::core::Point;
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::foundation::format::NumberFormat;

/// Progress at which the optional shaded band appears.
const SHADE_VISIBLE_AT: f64 = 0.99;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub values: Vec<f64>,
    /// Vertical offset added to this series' value annotations, in data units.
    #[serde(default)]
    pub annotation_offset: f64,
}

/// Band filled between two series once the lines are fully drawn.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShadeBand {
    pub lower: String,
    pub upper: String,
    /// Inclusive `x` range to restrict the band to.
    #[serde(default)]
    pub x_range: Option<[f64; 2]>,
}

/// Multi-series line chart drawn left to right by the reveal cursor.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LineChart {
    pub x: Vec<f64>,
    pub series: Vec<LineSeries>,
    /// Row indices to annotate with values; negative indices count from the end.
    #[serde(default)]
    pub annotate_at: Vec<i64>,
    #[serde(default)]
    pub format: NumberFormat,
    #[serde(default)]
    pub shade: Option<ShadeBand>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SeriesFrame {
    pub name: String,
    pub polyline: Vec<Point>,
    /// Leading dot, at the last drawn point.
    pub head: Option<Point>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineAnnotation {
    pub series: usize,
    pub row: usize,
    pub text: String,
    pub at: Point,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShadeFrame {
    pub visible: bool,
    pub lower: Vec<Point>,
    pub upper: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineFrame {
    pub cursor: f64,
    pub series: Vec<SeriesFrame>,
    pub annotations: Vec<LineAnnotation>,
    pub shade: Option<ShadeFrame>,
}

impl LineChart {
    pub fn validate(&self) -> EspressoResult<()> {
        if self.x.is_empty() {
            return Err(EspressoError::validation("line chart needs at least one row"));
        }
        if self.series.is_empty() {
            return Err(EspressoError::validation(
                "line chart needs at least one series",
            ));
        }
        if !self.x.iter().all(|v| v.is_finite()) {
            return Err(EspressoError::validation("line chart x values must be finite"));
        }
        for s in &self.series {
            if s.values.len() != self.x.len() {
                return Err(EspressoError::validation(format!(
                    "line series '{}' has {} values, expected {}",
                    s.name,
                    s.values.len(),
                    self.x.len()
                )));
            }
            if !s.values.iter().all(|v| v.is_finite()) {
                return Err(EspressoError::validation(format!(
                    "line series '{}' values must be finite",
                    s.name
                )));
            }
        }
        if let Some(shade) = &self.shade {
            for name in [&shade.lower, &shade.upper] {
                if self.series_index(name).is_none() {
                    return Err(EspressoError::validation(format!(
                        "shade references unknown series '{name}'"
                    )));
                }
            }
        }
        Ok(())
    }

    fn series_index(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s.name == name)
    }

    fn points(&self, series: &LineSeries) -> Vec<Point> {
        self.x
            .iter()
            .zip(&series.values)
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }

    /// Annotated rows with negative indices resolved; out-of-range entries are dropped.
    fn annotated_rows(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.x.len() as i64;
        self.annotate_at.iter().filter_map(move |&pos| {
            let p = if pos >= 0 { pos } else { n + pos };
            (0..n).contains(&p).then_some(p as usize)
        })
    }

    pub fn evaluate(&self, progress: f64) -> LineFrame {
        let cursor = RevealCursor::new(progress, self.x.len());

        let series = self
            .series
            .iter()
            .map(|s| {
                let polyline = cursor.polyline(&self.points(s));
                SeriesFrame {
                    name: s.name.clone(),
                    head: polyline.last().copied(),
                    polyline,
                }
            })
            .collect();

        let mut annotations = Vec::new();
        for row in self.annotated_rows() {
            let visible = cursor.annotation_visible(row);
            for (idx, s) in self.series.iter().enumerate() {
                let raw = s.values[row];
                annotations.push(LineAnnotation {
                    series: idx,
                    row,
                    text: self.format.format(raw),
                    at: Point::new(self.x[row], raw + s.annotation_offset),
                    visible,
                });
            }
        }

        let shade = self.shade.as_ref().and_then(|band| {
            let lower = &self.series[self.series_index(&band.lower)?];
            let upper = &self.series[self.series_index(&band.upper)?];
            let in_range = |x: f64| match band.x_range {
                Some([lo, hi]) => lo <= x && x <= hi,
                None => true,
            };
            let pick = |s: &LineSeries| {
                self.points(s)
                    .into_iter()
                    .filter(|p| in_range(p.x))
                    .collect::<Vec<_>>()
            };
            Some(ShadeFrame {
                visible: progress >= SHADE_VISIBLE_AT,
                lower: pick(lower),
                upper: pick(upper),
            })
        });

        LineFrame {
            cursor: cursor.position(),
            series,
            annotations,
            shade,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/line.rs"]
mod tests;
