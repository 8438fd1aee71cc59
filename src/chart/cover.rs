use crate::animation::reveal::RevealWindow;
use crate::foundation::core::Point;
use crate::foundation::error::EspressoResult;

fn default_accent() -> Option<AccentLine> {
    Some(AccentLine::default())
}

/// Decorative rule under the headline, drawn from the centre outward.
///
/// Coordinates are axes fractions (`0..1` on both axes).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccentLine {
    pub y: f64,
    pub length: f64,
    pub window: RevealWindow,
}

impl Default for AccentLine {
    fn default() -> Self {
        Self {
            y: 0.48,
            length: 0.15,
            window: RevealWindow::new(0.40, 0.65),
        }
    }
}

/// Title card: typewriter titles plus an optional accent line.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CoverTile {
    #[serde(default = "default_accent")]
    pub accent: Option<AccentLine>,
}

impl Default for CoverTile {
    fn default() -> Self {
        Self {
            accent: default_accent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AccentFrame {
    pub from: Point,
    pub to: Point,
    pub fraction: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoverFrame {
    /// `None` until the accent line starts drawing.
    pub accent: Option<AccentFrame>,
}

impl CoverTile {
    pub fn validate(&self) -> EspressoResult<()> {
        if let Some(accent) = &self.accent {
            accent.window.validate("accent line")?;
        }
        Ok(())
    }

    pub fn evaluate(&self, progress: f64) -> CoverFrame {
        let accent = self.accent.as_ref().and_then(|line| {
            let fraction = line.window.local_progress(progress);
            if fraction <= 0.0 {
                return None;
            }
            let half = line.length / 2.0 * fraction;
            Some(AccentFrame {
                from: Point::new(0.5 - half, line.y),
                to: Point::new(0.5 + half, line.y),
                fraction,
            })
        });
        CoverFrame { accent }
    }
}
