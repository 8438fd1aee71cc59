use super::*;
use crate::foundation::core::Point;

#[test]
fn typewriter_hello_at_quarter_progress() {
    let w = RevealWindow::new(0.0, 0.5);
    assert_eq!(typewriter("HELLO", 0.25, w), "HE");
}

#[test]
fn typewriter_window_edges() {
    let w = RevealWindow::new(0.2, 0.6);
    assert_eq!(w.typewriter("Record spending", 0.2), "");
    assert_eq!(w.typewriter("Record spending", 0.1), "");
    assert_eq!(w.typewriter("Record spending", 0.6), "Record spending");
    assert_eq!(w.typewriter("Record spending", 0.95), "Record spending");
}

#[test]
fn typewriter_never_exceeds_text_and_grows() {
    let text = "Valentine's Day spending hit a record";
    let w = RevealWindow::new(0.0, 0.95);
    let mut prev = 0;
    for i in 0..=100 {
        let p = f64::from(i) / 100.0;
        let shown = typewriter(text, p, w);
        assert!(text.starts_with(shown));
        assert!(shown.len() <= text.len());
        assert!(shown.len() >= prev);
        prev = shown.len();
    }
}

#[test]
fn typewriter_counts_chars_not_bytes() {
    let w = RevealWindow::new(0.0, 1.0);
    assert_eq!(typewriter("☕☕☕☕", 0.5, w), "☕☕");
    assert_eq!(typewriter("über", 0.25, w), "ü");
}

#[test]
fn typewriter_empty_text() {
    assert_eq!(typewriter("", 1.0, RevealWindow::full()), "");
}

#[test]
fn degenerate_window_is_a_jump_cut_at_start() {
    let w = RevealWindow::new(0.5, 0.5);
    assert!(w.is_degenerate());
    assert_eq!(w.typewriter("ABC", 0.49), "");
    assert_eq!(w.typewriter("ABC", 0.5), "ABC");
    assert_eq!(w.local_progress(0.49), 0.0);
    assert_eq!(w.local_progress(0.7), 1.0);

    let inverted = RevealWindow::new(0.8, 0.2);
    assert_eq!(inverted.typewriter("ABC", 0.5), "");
    assert_eq!(inverted.typewriter("ABC", 0.8), "ABC");
}

#[test]
fn local_progress_is_clamped_ramp() {
    let w = RevealWindow::new(0.5, 0.95);
    assert_eq!(w.local_progress(0.0), 0.0);
    assert!((w.local_progress(0.725) - 0.5).abs() < 1e-12);
    assert_eq!(w.local_progress(1.0), 1.0);
}

#[test]
fn window_validation_and_serde() {
    assert!(RevealWindow::new(0.0, 1.0).validate("headline").is_ok());
    assert!(RevealWindow::new(-0.1, 0.5).validate("headline").is_err());
    assert!(RevealWindow::new(0.0, f64::NAN).validate("headline").is_err());

    let w: RevealWindow = serde_json::from_str("[0.5, 0.95]").unwrap();
    assert_eq!(w, RevealWindow::new(0.5, 0.95));
    assert_eq!(serde_json::to_string(&w).unwrap(), "[0.5,0.95]");
}

#[test]
fn quantity_reveal_is_linear_in_progress() {
    assert_eq!(reveal_quantity(29.1, 0.0), 0.0);
    assert_eq!(reveal_quantity(29.1, 1.0), 29.1);
    assert_eq!(reveal_quantity(-8.0, 0.25), -2.0);
    let a = reveal_quantity(10.0, 0.2);
    let b = reveal_quantity(10.0, 0.4);
    assert!((b - 2.0 * a).abs() < 1e-12);
}

#[test]
fn cursor_five_elements_at_half_progress() {
    let c = RevealCursor::new(0.5, 5);
    assert_eq!(c.position(), 2.5);
    assert_eq!(c.element(0), ElementReveal::Full);
    assert_eq!(c.element(1), ElementReveal::Full);
    assert_eq!(c.element(2), ElementReveal::Partial(0.5));
    assert_eq!(c.element(3), ElementReveal::Hidden);
    assert_eq!(c.element(4), ElementReveal::Hidden);
}

#[test]
fn cursor_bounds() {
    let start = RevealCursor::new(0.0, 4);
    assert_eq!(start.element(0), ElementReveal::Partial(0.0));
    assert_eq!(start.element(1), ElementReveal::Hidden);
    assert!(!start.is_complete());

    let end = RevealCursor::new(1.0, 4);
    assert!(end.is_complete());
    for i in 0..4 {
        assert_eq!(end.element(i), ElementReveal::Full);
    }
    assert_eq!(end.element(4), ElementReveal::Hidden);
}

#[test]
fn annotations_toggle_past_element_midpoint() {
    let c = RevealCursor::new(0.5, 5);
    assert!(c.annotation_visible(0));
    assert!(c.annotation_visible(1));
    assert!(!c.annotation_visible(2));
    assert!(!c.annotation_visible(3));
    assert!(RevealCursor::new(1.0, 5).annotation_visible(4));
}

#[test]
fn polyline_interpolates_toward_successor() {
    let pts: Vec<Point> = (0..5)
        .map(|i| Point::new(f64::from(i), f64::from(i * 10)))
        .collect();

    let line = RevealCursor::new(0.5, 5).polyline(&pts);
    assert_eq!(line.len(), 4);
    assert_eq!(line[..3], pts[..3]);
    assert_eq!(line[3], Point::new(2.5, 25.0));

    assert_eq!(RevealCursor::new(0.0, 5).polyline(&pts), vec![pts[0]]);
    assert_eq!(RevealCursor::new(1.0, 5).polyline(&pts), pts);
    assert!(RevealCursor::new(0.5, 0).polyline::<Point>(&[]).is_empty());
}
