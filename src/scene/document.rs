use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::chart::Chart;
use crate::foundation::core::Canvas;
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::scene::config::{AnimationConfig, AnimationPatch, Titles};

/// JSON-facing description of one chart video: canvas, timing, titles and data.
///
/// ```json
/// {
///   "canvas": { "width": 1080, "height": 1920 },
///   "animation": { "duration_secs": 8, "fps": 30, "hold_frames": 120, "easing": "cubic" },
///   "titles": { "headline": "Record spending", "subheadline": "US, $bn", "label": "Source: NRF" },
///   "chart": { "kind": "bar", "rows": [{ "category": "Candy", "value": 29.1 }] }
/// }
/// ```
///
/// Animation fields left out of the document come from the chart kind's preset
/// ([`AnimationConfig::preset_for`]).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(from = "DocumentDef")]
pub struct ChartDocument {
    pub canvas: Canvas,
    pub animation: AnimationConfig,
    pub titles: Titles,
    pub chart: Chart,
}

#[derive(serde::Deserialize)]
struct DocumentDef {
    #[serde(default)]
    canvas: Canvas,
    #[serde(default)]
    animation: AnimationPatch,
    #[serde(default)]
    titles: Titles,
    chart: Chart,
}

impl From<DocumentDef> for ChartDocument {
    fn from(def: DocumentDef) -> Self {
        let preset = AnimationConfig::preset_for(def.chart.kind());
        Self {
            canvas: def.canvas,
            animation: def.animation.resolve(preset),
            titles: def.titles,
            chart: def.chart,
        }
    }
}

impl ChartDocument {
    pub fn from_reader<R: std::io::Read>(r: R) -> EspressoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EspressoError::validation(format!("parse chart document JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> EspressoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                EspressoError::not_found(format!("chart document '{}'", path.display()))
            }
            _ => EspressoError::validation(format!(
                "open chart document '{}': {e}",
                path.display()
            )),
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> EspressoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EspressoError::serde(format!("serialize chart document: {e}")))
    }

    pub fn validate(&self) -> EspressoResult<()> {
        self.canvas.validate()?;
        self.animation.validate()?;
        self.chart.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "chart": { "kind": "bar", "rows": [{ "category": "Candy", "value": 29.1 }] }
    }"#;

    #[test]
    fn minimal_document_takes_defaults() {
        let doc = ChartDocument::from_reader(MINIMAL.as_bytes()).unwrap();
        doc.validate().unwrap();
        assert_eq!(doc.canvas, Canvas::reel());
        assert_eq!(doc.animation, AnimationConfig::default());
        assert_eq!(doc.titles, Titles::default());
        assert_eq!(doc.chart.kind(), "bar");
    }

    #[test]
    fn cover_document_takes_cover_preset() {
        let doc = ChartDocument::from_reader(
            r#"{"titles": {"headline": "Latte", "subheadline": "2024"}, "chart": {"kind": "cover"}}"#
                .as_bytes(),
        )
        .unwrap();
        doc.validate().unwrap();
        let clock = doc.animation.clock().unwrap();
        assert_eq!(clock.animation_frames(), 45);
        assert_eq!(clock.hold_frames(), 30);

        let session =
            crate::session::AnimationSession::new(&doc, crate::session::SessionOpts::default())
                .unwrap();
        let first = session.evaluate_frame(crate::foundation::core::FrameIndex(0)).unwrap();
        assert_eq!(first.headline, "Latte");
        assert_eq!(first.subheadline, "2024");
    }

    #[test]
    fn explicit_animation_fields_beat_the_preset() {
        let doc = ChartDocument::from_reader(
            r#"{"animation": {"duration_secs": 3, "hold_frames": 10}, "chart": {"kind": "cover"}}"#
                .as_bytes(),
        )
        .unwrap();
        let clock = doc.animation.clock().unwrap();
        assert_eq!(clock.animation_frames(), 90);
        assert_eq!(clock.hold_frames(), 10);
        assert_eq!(doc.animation.headline, AnimationConfig::cover().headline);
    }

    #[test]
    fn unknown_kind_is_a_validation_error() {
        let err = ChartDocument::from_reader(r#"{"chart": {"kind": "radar"}}"#.as_bytes())
            .unwrap_err();
        assert!(matches!(err, EspressoError::Validation(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = ChartDocument::from_path("target/does/not/exist.json").unwrap_err();
        assert!(matches!(err, EspressoError::NotFound(_)));
    }

    #[test]
    fn round_trips_through_json() {
        let doc = ChartDocument::from_reader(MINIMAL.as_bytes()).unwrap();
        let json = doc.to_json_pretty().unwrap();
        let back = ChartDocument::from_reader(json.as_bytes()).unwrap();
        back.validate().unwrap();
        assert_eq!(back.animation, doc.animation);
    }

    #[test]
    fn odd_canvas_fails_validation() {
        let mut doc = ChartDocument::from_reader(MINIMAL.as_bytes()).unwrap();
        doc.canvas.width = 1079;
        assert!(doc.validate().is_err());
    }
}
