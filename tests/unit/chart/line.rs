use super::*;

fn chart() -> LineChart {
    LineChart {
        x: vec![2019.0, 2020.0, 2021.0, 2022.0, 2023.0],
        series: vec![
            LineSeries {
                name: "low".to_owned(),
                values: vec![10.0, 20.0, 30.0, 40.0, 50.0],
                annotation_offset: 0.0,
            },
            LineSeries {
                name: "high".to_owned(),
                values: vec![15.0, 25.0, 35.0, 45.0, 55.0],
                annotation_offset: 2.0,
            },
        ],
        annotate_at: vec![0, -1, 99],
        format: NumberFormat::default(),
        shade: Some(ShadeBand {
            lower: "low".to_owned(),
            upper: "high".to_owned(),
            x_range: Some([2020.0, 2022.0]),
        }),
    }
}

#[test]
fn half_progress_draws_two_and_a_half_rows() {
    let f = chart().evaluate(0.5);
    assert_eq!(f.cursor, 2.5);
    let low = &f.series[0];
    assert_eq!(
        low.polyline,
        vec![
            Point::new(2019.0, 10.0),
            Point::new(2020.0, 20.0),
            Point::new(2021.0, 30.0),
            Point::new(2021.5, 35.0),
        ]
    );
    assert_eq!(low.head, Some(Point::new(2021.5, 35.0)));
}

#[test]
fn start_shows_only_the_first_point() {
    let f = chart().evaluate(0.0);
    for s in &f.series {
        assert_eq!(s.polyline.len(), 1);
        assert_eq!(s.head, s.polyline.first().copied());
    }
}

#[test]
fn full_progress_draws_everything() {
    let f = chart().evaluate(1.0);
    assert_eq!(f.series[1].polyline.len(), 5);
    assert_eq!(f.series[1].head, Some(Point::new(2023.0, 55.0)));
    assert!(f.annotations.iter().all(|a| a.visible));
}

#[test]
fn annotations_resolve_negative_rows_and_drop_out_of_range() {
    let f = chart().evaluate(0.5);
    // rows 0 and 4, two series each; row 99 is dropped
    assert_eq!(f.annotations.len(), 4);
    let first = &f.annotations[0];
    assert_eq!((first.series, first.row), (0, 0));
    assert!(first.visible);
    let last_high = &f.annotations[3];
    assert_eq!((last_high.series, last_high.row), (1, 4));
    assert_eq!(last_high.text, "55");
    assert_eq!(last_high.at, Point::new(2023.0, 57.0));
    assert!(!last_high.visible);
}

#[test]
fn shade_appears_only_at_the_end() {
    let c = chart();
    let mid = c.evaluate(0.98).shade.unwrap();
    assert!(!mid.visible);
    assert_eq!(mid.lower.len(), 3);
    assert_eq!(mid.upper[0], Point::new(2020.0, 25.0));
    assert!(c.evaluate(0.99).shade.unwrap().visible);
}

#[test]
fn validation_catches_inconsistent_data() {
    assert!(chart().validate().is_ok());

    let mut c = chart();
    c.series[0].values.pop();
    assert!(c.validate().is_err());

    let mut c = chart();
    c.shade.as_mut().unwrap().upper = "missing".to_owned();
    assert!(c.validate().is_err());

    let mut c = chart();
    c.series.clear();
    assert!(c.validate().is_err());
}
