//! Per-chart frame evaluation.
//!
//! Each chart turns one progress value into the geometry and label text of that frame. Evaluating
//! at progress `1.0` yields the static (carousel) version of the chart.

pub mod bar;
pub mod cover;
pub mod donut;
pub mod line;
pub mod stem;

use crate::foundation::error::EspressoResult;

pub use bar::{BarChart, BarFrame, BarRow};
pub use cover::{AccentLine, CoverFrame, CoverTile};
pub use donut::{DonutChart, DonutFrame, DonutSlice};
pub use line::{LineChart, LineFrame, LineSeries, ShadeBand};
pub use stem::{StemChart, StemFrame, StemRow};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
    Stem(StemChart),
    Donut(DonutChart),
    Cover(CoverTile),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartFrame {
    Bar(BarFrame),
    Line(LineFrame),
    Stem(StemFrame),
    Donut(DonutFrame),
    Cover(CoverFrame),
}

impl Chart {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bar(_) => "bar",
            Self::Line(_) => "line",
            Self::Stem(_) => "stem",
            Self::Donut(_) => "donut",
            Self::Cover(_) => "cover",
        }
    }

    pub fn validate(&self) -> EspressoResult<()> {
        match self {
            Self::Bar(c) => c.validate(),
            Self::Line(c) => c.validate(),
            Self::Stem(c) => c.validate(),
            Self::Donut(c) => c.validate(),
            Self::Cover(c) => c.validate(),
        }
    }

    pub fn evaluate(&self, progress: f64) -> ChartFrame {
        match self {
            Self::Bar(c) => ChartFrame::Bar(c.evaluate(progress)),
            Self::Line(c) => ChartFrame::Line(c.evaluate(progress)),
            Self::Stem(c) => ChartFrame::Stem(c.evaluate(progress)),
            Self::Donut(c) => ChartFrame::Donut(c.evaluate(progress)),
            Self::Cover(c) => ChartFrame::Cover(c.evaluate(progress)),
        }
    }
}
