use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn known_values() {
    assert_eq!(Ease::Linear.apply(0.3), 0.3);
    assert!((Ease::OutQuad.apply(0.5) - 0.75).abs() < 1e-12);
    assert!((Ease::OutCubic.apply(0.5) - 0.875).abs() < 1e-12);
}

#[test]
fn names_resolve_with_aliases() {
    assert_eq!(Ease::from_name("linear"), Ease::Linear);
    assert_eq!(Ease::from_name("quad"), Ease::OutQuad);
    assert_eq!(Ease::from_name("quadratic-out"), Ease::OutQuad);
    assert_eq!(Ease::from_name("Cubic"), Ease::OutCubic);
    assert_eq!(Ease::from_name(" cubic-out "), Ease::OutCubic);
}

#[test]
fn unknown_name_falls_back_to_cubic_out() {
    assert_eq!(Ease::lookup("bounce"), None);
    assert_eq!(Ease::from_name("bounce"), Ease::OutCubic);
    assert_eq!(Ease::from_name(""), Ease::OutCubic);
}

#[test]
fn serde_uses_names() {
    let e: Ease = serde_json::from_str(r#""quad""#).unwrap();
    assert_eq!(e, Ease::OutQuad);
    let e: Ease = serde_json::from_str(r#""elastic""#).unwrap();
    assert_eq!(e, Ease::OutCubic);
    assert_eq!(serde_json::to_string(&Ease::Linear).unwrap(), r#""linear""#);
}
