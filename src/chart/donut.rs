use crate::foundation::core::Point;
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::foundation::format::NumberFormat;

/// Wedges open clockwise from twelve o'clock.
const START_ANGLE_DEG: f64 = 90.0;
/// Sweeps below this are not drawn (but still consume their angle).
const MIN_DRAWN_SWEEP_DEG: f64 = 0.5;
const CATEGORY_LABELS_AFTER: f64 = 0.5;
const PERCENT_LABELS_AFTER: f64 = 0.3;

fn default_radius() -> f64 {
    0.9
}

fn default_wedge_width() -> f64 {
    0.3
}

fn default_label_distance() -> f64 {
    1.05
}

fn default_pct_distance() -> f64 {
    0.8
}

fn default_true() -> bool {
    true
}

fn default_pct_format() -> NumberFormat {
    NumberFormat::new("{:.0f}%", 1.0)
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DonutSlice {
    #[serde(default)]
    pub label: Option<String>,
    pub value: f64,
}

/// Donut chart whose wedges sweep open together.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DonutChart {
    pub slices: Vec<DonutSlice>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_wedge_width")]
    pub wedge_width: f64,
    /// Category label radius as a multiple of `radius`.
    #[serde(default = "default_label_distance")]
    pub label_distance: f64,
    #[serde(default = "default_pct_distance")]
    pub pct_distance: f64,
    #[serde(default = "default_true")]
    pub show_pct: bool,
    /// Applied to the slice share in percent (0..=100).
    #[serde(default = "default_pct_format")]
    pub pct_format: NumberFormat,
    #[serde(default)]
    pub center_text: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedText {
    pub text: String,
    pub at: Point,
    pub align: HAlign,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WedgeState {
    pub index: usize,
    /// Angles in degrees, counter-clockwise from the positive x axis; `theta_start < theta_end`.
    pub theta_start: f64,
    pub theta_end: f64,
    pub sweep: f64,
    pub label: Option<PlacedText>,
    pub pct: Option<PlacedText>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DonutFrame {
    pub radius: f64,
    pub wedge_width: f64,
    pub wedges: Vec<WedgeState>,
    pub center_text: Option<String>,
}

impl DonutChart {
    pub fn validate(&self) -> EspressoResult<()> {
        if self.slices.is_empty() {
            return Err(EspressoError::validation(
                "donut chart needs at least one slice",
            ));
        }
        if self
            .slices
            .iter()
            .any(|s| !s.value.is_finite() || s.value < 0.0)
        {
            return Err(EspressoError::validation(
                "donut slice values must be finite and >= 0",
            ));
        }
        if self.total() <= 0.0 {
            return Err(EspressoError::validation(
                "donut slice values must not sum to zero",
            ));
        }
        if !(self.radius > 0.0 && self.wedge_width > 0.0 && self.wedge_width <= self.radius) {
            return Err(EspressoError::validation(
                "donut radius must be > 0 and wedge_width in (0, radius]",
            ));
        }
        Ok(())
    }

    fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn evaluate(&self, progress: f64) -> DonutFrame {
        let total = self.total();
        let mut current = START_ANGLE_DEG;
        let mut wedges = Vec::with_capacity(self.slices.len());

        for (index, slice) in self.slices.iter().enumerate() {
            let fraction = slice.value / total;
            let sweep = fraction * 360.0 * progress;
            let theta_end = current;
            let theta_start = current - sweep;
            current = theta_start;
            if sweep < MIN_DRAWN_SWEEP_DEG {
                continue;
            }

            let mid = (theta_end - sweep / 2.0).to_radians();
            let (sin, cos) = mid.sin_cos();

            let label = slice
                .label
                .as_ref()
                .filter(|_| progress > CATEGORY_LABELS_AFTER)
                .map(|text| {
                    let r = self.radius * self.label_distance;
                    let at = Point::new(r * cos, r * sin);
                    PlacedText {
                        text: text.clone(),
                        align: if at.x >= 0.0 {
                            HAlign::Left
                        } else {
                            HAlign::Right
                        },
                        at,
                    }
                });

            let pct = (self.show_pct && progress > PERCENT_LABELS_AFTER).then(|| {
                // pct_distance is relative to the ring centre line, 0.8 puts it on it.
                let r = (self.radius - self.wedge_width / 2.0) * self.pct_distance / 0.8;
                PlacedText {
                    text: self.pct_format.format(fraction * 100.0),
                    at: Point::new(r * cos, r * sin),
                    align: HAlign::Center,
                }
            });

            wedges.push(WedgeState {
                index,
                theta_start,
                theta_end,
                sweep,
                label,
                pct,
            });
        }

        DonutFrame {
            radius: self.radius,
            wedge_width: self.wedge_width,
            wedges,
            center_text: self.center_text.clone(),
        }
    }
}
