use espresso::{
    AnimationClock, Ease, ElementReveal, Fps, FrameIndex, RevealCursor, RevealWindow,
    reveal_quantity, typewriter,
};

fn reel_clock() -> AnimationClock {
    AnimationClock::new(Fps::new(30).unwrap(), 8.0, 120).unwrap()
}

#[test]
fn reel_timeline_lengths() {
    let c = reel_clock();
    assert_eq!(c.animation_frames(), 240);
    assert_eq!(c.total_frames(), 360);
}

#[test]
fn progress_starts_at_zero_and_approaches_one() {
    let c = reel_clock();
    for ease in Ease::ALL {
        assert_eq!(c.progress(FrameIndex(0), ease), 0.0, "{ease}");
        let last = c.progress(FrameIndex(239), ease);
        assert!(last < 1.0, "{ease}: {last}");
        assert!(last > 0.99, "{ease}: {last}");
    }
}

#[test]
fn hold_phase_is_pinned_to_one() {
    let c = reel_clock();
    for ease in Ease::ALL {
        for f in 240..360 {
            assert_eq!(c.progress(FrameIndex(f), ease), 1.0);
        }
        assert_eq!(c.progress(FrameIndex(300), ease), 1.0);
        // Past the timeline is still a hold, never an overshoot.
        assert_eq!(c.progress(FrameIndex(10_000), ease), 1.0);
    }
}

#[test]
fn progress_is_monotonic_for_every_easing() {
    let c = reel_clock();
    for ease in Ease::ALL {
        let mut prev = 0.0;
        for f in 0..=c.animation_frames() {
            let p = c.progress(FrameIndex(f), ease);
            assert!(p >= prev, "{ease} went backwards at frame {f}");
            assert!((0.0..=1.0).contains(&p));
            prev = p;
        }
    }
}

#[test]
fn typewriter_bounds() {
    let w = RevealWindow::new(0.0, 0.5);
    let text = "Record coffee prices";
    assert_eq!(typewriter(text, 0.0, w), "");
    assert_eq!(typewriter(text, 0.5, w), text);
    assert_eq!(typewriter(text, 1.0, w), text);
    assert_eq!(typewriter("HELLO", 0.25, w), "HE");

    let c = reel_clock();
    for f in 0..c.total_frames() {
        let p = c.progress(FrameIndex(f), Ease::OutCubic);
        let shown = typewriter(text, p, w);
        assert!(text.starts_with(shown));
        assert!(shown.chars().count() <= text.chars().count());
    }
}

#[test]
fn quantity_reveal_is_linear_in_progress() {
    let v = 29.1;
    assert_eq!(reveal_quantity(v, 0.0), 0.0);
    assert_eq!(reveal_quantity(v, 1.0), v);
    for i in 0..=10 {
        let p = f64::from(i) / 10.0;
        assert!((reveal_quantity(v, p) - v * p).abs() < 1e-12);
    }
}

#[test]
fn cursor_over_five_elements_at_half() {
    let cursor = RevealCursor::new(0.5, 5);
    assert_eq!(cursor.position(), 2.5);
    assert_eq!(cursor.element(0), ElementReveal::Full);
    assert_eq!(cursor.element(1), ElementReveal::Full);
    assert_eq!(cursor.element(2), ElementReveal::Partial(0.5));
    assert_eq!(cursor.element(3), ElementReveal::Hidden);
    assert_eq!(cursor.element(4), ElementReveal::Hidden);
}
