use std::cell::Cell;

use approx::assert_relative_eq;

use super::*;
use crate::error::OperationError;
use crate::geodesy::DirectSolution;
use crate::math::intersect_3d::signed_distance_to_plane;
use crate::math::Point3;

/// Length of one degree of longitude on the WGS84 equator.
const EQUATOR_DEGREE: f64 = 6_378_137.0 * std::f64::consts::PI / 180.0;

fn geo(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat).unwrap()
}

fn ring(coords: &[[f64; 2]]) -> Vec<GeoPoint> {
    coords.iter().map(|&[lon, lat]| geo(lon, lat)).collect()
}

fn unit_square() -> Vec<GeoPoint> {
    ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]])
}

fn hatching(ring: Vec<GeoPoint>, options: HatchingOptions) -> ParallelHatching {
    ParallelHatching::new(ring, options).unwrap()
}

/// Closed axis-aligned square with its south-west corner at `(lon, lat)`.
fn square_at(lon: f64, lat: f64, side: f64) -> Vec<GeoPoint> {
    ring(&[
        [lon, lat],
        [lon, lat + side],
        [lon + side, lat + side],
        [lon + side, lat],
        [lon, lat],
    ])
}

fn options(step: f64, bearing: f64, offset: f64) -> HatchingOptions {
    HatchingOptions::default()
        .with_step(step)
        .with_bearing(bearing)
        .with_offset(offset)
}

// ── scenarios ──

#[test]
fn square_yields_two_north_south_strokes() {
    // Pass 0 only touches the start corner and collapses to a point; passes
    // at 40 km and 80 km cross the square; 120 km is past the east edge.
    let lines = hatching(unit_square(), options(40_000.0, 0.0, 0.0))
        .execute()
        .unwrap();

    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_relative_eq!(line.start.lat, 1.0, epsilon = 1e-3);
        assert_relative_eq!(line.end.lat, 0.0, epsilon = 1e-9);
        assert!(line.start.lon > 0.0 && line.start.lon < 1.0);
        assert!(line.end.lon > 0.0 && line.end.lon < 1.0);
    }
    assert!(lines[0].end.lon < lines[1].end.lon);
}

#[test]
fn stroke_count_follows_extent() {
    let step = 10_000.0;
    let lines = hatching(unit_square(), options(step, 0.0, 50.0))
        .execute()
        .unwrap();

    let expected = EQUATOR_DEGREE / step;
    #[allow(clippy::cast_precision_loss)]
    let count = lines.len() as f64;
    assert!(
        (count - expected).abs() <= 1.0,
        "expected about {expected} strokes, got {count}"
    );
}

#[test]
fn bearing_east_gives_east_west_strokes() {
    let lines = hatching(unit_square(), options(10_000.0, 90.0, 0.0))
        .execute()
        .unwrap();

    // The south-facing pass through the start corner runs along the south
    // edge: vertex (1, 0) sits a fraction of a millimetre past that plane.
    assert!((10..=12).contains(&lines.len()), "got {} strokes", lines.len());
    for line in &lines {
        assert!(line.start.lon.abs() < 1e-9);
        assert_relative_eq!(line.end.lon, 1.0, epsilon = 1e-9);
        assert!(line.start.lat > -1e-9 && line.start.lat < 1.0);
    }
}

#[test]
fn forward_strokes_precede_reverse_strokes() {
    // Starting mid-way along the south edge, both sweeps cross the square.
    let square = ring(&[
        [0.5, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.0],
        [0.5, 0.0],
    ]);
    let segments = hatching(square, options(10_000.0, 0.0, 50.0))
        .execute_cartesian()
        .unwrap();

    let split = segments
        .iter()
        .position(|s| s.direction == SweepDirection::Reverse)
        .unwrap();
    assert!(split > 0);
    assert!(segments[..split]
        .iter()
        .all(|s| s.direction == SweepDirection::Forward));
    assert!(segments[split..]
        .iter()
        .all(|s| s.direction == SweepDirection::Reverse));

    assert_eq!(segments[0].pass, 0);
    assert_eq!(segments[split].pass, 1);
    for window in segments[..split].windows(2) {
        assert!(window[0].pass < window[1].pass);
    }
    for window in segments[split..].windows(2) {
        assert!(window[0].pass < window[1].pass);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = segments.len() as f64;
    assert!((count - EQUATOR_DEGREE / 10_000.0).abs() <= 1.0);
}

// ── properties ──

#[test]
fn endpoints_lie_on_their_cutting_plane() {
    let segments = hatching(unit_square(), options(7_500.0, 30.0, 50.0))
        .execute_cartesian()
        .unwrap();
    assert!(!segments.is_empty());

    for hatch in &segments {
        for point in [hatch.segment.start(), hatch.segment.end()] {
            let distance = signed_distance_to_plane(point, &hatch.plane);
            assert!(distance.abs() < 1e-5, "endpoint {distance} m off its plane");
        }
    }
}

#[test]
fn extension_adds_twice_the_offset() {
    let bare = hatching(unit_square(), options(20_000.0, 15.0, 0.0))
        .execute_cartesian()
        .unwrap();
    let extended = hatching(unit_square(), options(20_000.0, 15.0, 75.0))
        .execute_cartesian()
        .unwrap();

    assert_eq!(bare.len(), extended.len());
    for (b, e) in bare.iter().zip(&extended) {
        assert_eq!(b.pass, e.pass);
        assert_relative_eq!(e.segment.length(), b.segment.length() + 150.0, epsilon = 1e-6);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let operation = hatching(unit_square(), options(5_000.0, 45.0, 50.0));
    let first = operation.execute().unwrap();
    let second = operation.execute().unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn geographic_output_matches_cartesian_output() {
    let operation = hatching(unit_square(), options(25_000.0, 0.0, 50.0));
    let lines = operation.execute().unwrap();
    let segments = operation.execute_cartesian().unwrap();
    assert_eq!(lines.len(), segments.len());

    let wgs84 = Wgs84::new().unwrap();
    for (line, hatch) in lines.iter().zip(&segments) {
        let start: Point3 = wgs84.to_cartesian(&line.start).unwrap();
        assert_relative_eq!(start, *hatch.segment.start(), epsilon = 1e-6);
        assert!(line.start.alt.is_some());
    }
}

// ── ring closure ──

#[test]
fn open_ring_is_closed_by_default() {
    let mut open = unit_square();
    open.pop();

    let closed_lines = hatching(unit_square(), options(20_000.0, 0.0, 50.0))
        .execute()
        .unwrap();
    let open_lines = hatching(open, options(20_000.0, 0.0, 50.0))
        .execute()
        .unwrap();
    assert_eq!(closed_lines, open_lines);
}

#[test]
fn open_ring_as_given_misses_its_closing_edge() {
    let mut open = unit_square();
    open.pop();

    let lines = hatching(
        open,
        options(20_000.0, 0.0, 50.0).with_closure(RingClosure::AsGiven),
    )
    .execute()
    .unwrap();
    // The start plane touches only the start vertex and every later plane
    // crosses only the north edge, so nothing pairs up.
    assert!(lines.is_empty());
}

// ── degenerate pairs ──

#[test]
fn degenerate_pair_fails_on_request() {
    let err = hatching(
        unit_square(),
        options(40_000.0, 0.0, 0.0).with_degenerate(DegeneratePolicy::Fail),
    )
    .execute()
    .unwrap_err();
    assert!(matches!(
        err,
        HatchError::Geometry(GeometryError::DegenerateSegment { .. })
    ));
}

#[test]
fn degenerate_pair_is_skipped_by_default() {
    let segments = hatching(unit_square(), options(40_000.0, 0.0, 0.0))
        .execute_cartesian()
        .unwrap();
    assert!(segments.iter().all(|s| s.pass > 0));
    assert!(segments.iter().all(|s| s.segment.length() > 1.0));
}

// ── input validation ──

#[test]
fn zero_step_is_rejected() {
    let err = hatching(unit_square(), options(0.0, 0.0, 50.0))
        .execute()
        .unwrap_err();
    assert!(matches!(
        err,
        HatchError::Input(InputError::InvalidParameter { name: "step", .. })
    ));
}

#[test]
fn invalid_parameters_are_rejected() {
    for opts in [
        options(-5.0, 0.0, 50.0),
        options(f64::NAN, 0.0, 50.0),
        options(100.0, f64::INFINITY, 50.0),
        options(100.0, 0.0, -1.0),
        options(100.0, 0.0, 50.0).with_max_passes(0),
    ] {
        assert!(opts.validate().is_err(), "{opts:?} should be invalid");
    }
    assert!(HatchingOptions::default().validate().is_ok());
}

#[test]
fn single_point_ring_is_rejected() {
    let err = hatching(vec![geo(0.0, 0.0)], HatchingOptions::default())
        .execute()
        .unwrap_err();
    assert!(matches!(
        err,
        HatchError::Input(InputError::TooFewPoints { count: 1, min: 2 })
    ));
}

#[test]
fn out_of_range_vertex_is_rejected() {
    let ring = vec![
        GeoPoint {
            lon: 400.0,
            lat: 0.0,
            alt: None,
        },
        GeoPoint {
            lon: 401.0,
            lat: 0.0,
            alt: None,
        },
        GeoPoint {
            lon: 401.0,
            lat: 1.0,
            alt: None,
        },
    ];
    let err = hatching(ring, HatchingOptions::default())
        .execute()
        .unwrap_err();
    assert!(matches!(
        err,
        HatchError::Input(InputError::OutOfRange { name: "longitude", .. })
    ));
}

#[test]
fn unbounded_pass_limit_is_accepted() {
    let lines = hatching(
        unit_square(),
        options(10_000.0, 0.0, 50.0).with_max_passes(usize::MAX),
    )
    .execute()
    .unwrap();
    #[allow(clippy::cast_precision_loss)]
    let count = lines.len() as f64;
    assert!((count - EQUATOR_DEGREE / 10_000.0).abs() <= 1.0);
}

#[test]
fn pass_limit_stops_runaway_sweeps() {
    let err = hatching(
        unit_square(),
        options(1_000.0, 0.0, 50.0).with_max_passes(50),
    )
    .execute()
    .unwrap_err();
    assert!(matches!(
        err,
        HatchError::Operation(OperationError::PassLimitExceeded { limit: 50, .. })
    ));
}

// ── entry points ──

#[test]
fn from_rings_uses_first_ring_only() {
    let rings = vec![
        vec![
            vec![0.0, 0.0, 10.0],
            vec![0.0, 1.0, 10.0],
            vec![1.0, 1.0, 10.0],
            vec![1.0, 0.0, 10.0],
            vec![0.0, 0.0, 10.0],
        ],
        vec![vec![0.2, 0.2], vec![0.2, 0.4], vec![0.4, 0.4], vec![0.2, 0.2]],
    ];
    let from_rings = ParallelHatching::from_rings(&rings, options(40_000.0, 0.0, 0.0))
        .unwrap()
        .execute()
        .unwrap();
    let direct = hatching(unit_square(), options(40_000.0, 0.0, 0.0))
        .execute()
        .unwrap();
    assert_eq!(from_rings, direct);
}

#[test]
fn from_rings_rejects_empty_and_malformed_input() {
    let empty: Vec<Vec<[f64; 2]>> = Vec::new();
    assert!(matches!(
        ParallelHatching::from_rings(&empty, HatchingOptions::default()),
        Err(HatchError::Input(InputError::EmptyInput))
    ));

    let malformed = vec![vec![vec![0.0, 0.0], vec![1.0]]];
    assert!(matches!(
        ParallelHatching::from_rings(&malformed, HatchingOptions::default()),
        Err(HatchError::Input(InputError::InvalidPosition { index: 1, len: 1 }))
    ));

    let out_of_range = vec![vec![[0.0, 0.0], [0.0, 95.0]]];
    assert!(matches!(
        ParallelHatching::from_rings(&out_of_range, HatchingOptions::default()),
        Err(HatchError::Input(InputError::OutOfRange { name: "latitude", .. }))
    ));
}

#[test]
fn create_parallel_hatching_with_defaults() {
    // About 1.1 km wide; the default 100 m step gives roughly 11 strokes.
    let rings = vec![vec![
        [0.0, 0.0],
        [0.0, 0.01],
        [0.01, 0.01],
        [0.01, 0.0],
        [0.0, 0.0],
    ]];
    let lines = create_parallel_hatching(&rings, 100.0, 0.0, 50.0).unwrap();

    #[allow(clippy::cast_precision_loss)]
    let count = lines.len() as f64;
    assert!((count - EQUATOR_DEGREE / 100.0 / 100.0).abs() <= 1.0);

    // Offset pushes both ends past the ring by about 50 m (0.00045°).
    for line in &lines {
        assert!(line.start.lat > 0.01);
        assert!(line.end.lat < 0.0);
    }
}

// ── scale ──

fn assert_count_matches_extent(side: f64, bearing: f64) {
    let extent = side * EQUATOR_DEGREE;
    let step = extent / 10.5;
    let lines = hatching(square_at(0.0, 0.0, side), options(step, bearing, 0.0))
        .execute()
        .unwrap();

    #[allow(clippy::cast_precision_loss)]
    let count = lines.len() as f64;
    assert!(
        (count - extent / step).abs() <= 1.0,
        "side {side}° bearing {bearing}: expected about {} strokes, got {count}",
        extent / step
    );
}

#[test]
fn hundred_metre_square_is_hatched() {
    assert_count_matches_extent(0.001, 0.0);
    assert_count_matches_extent(0.001, 90.0);
}

#[test]
fn kilometre_square_is_hatched() {
    assert_count_matches_extent(0.01, 0.0);
    assert_count_matches_extent(0.01, 90.0);
}

#[test]
fn hundred_kilometre_square_is_hatched() {
    assert_count_matches_extent(1.0, 0.0);
    assert_count_matches_extent(1.0, 90.0);
}

#[test]
fn sub_kilometre_rectangle_away_from_equator() {
    // About 630 m by 445 m near 45°N; the start corner's west edge lies
    // almost in the first cutting plane.
    let field = ring(&[
        [7.0, 45.0],
        [7.0, 45.004],
        [7.008, 45.004],
        [7.008, 45.0],
        [7.0, 45.0],
    ]);
    let lines = hatching(field, options(50.0, 0.0, 50.0)).execute().unwrap();

    let extent = 0.008 * EQUATOR_DEGREE * 45f64.to_radians().cos();
    #[allow(clippy::cast_precision_loss)]
    let count = lines.len() as f64;
    assert!((count - extent / 50.0).abs() <= 1.0, "got {count} strokes");
    for line in &lines {
        assert!(line.start.lat > 45.004);
        assert!(line.end.lat < 45.0);
        assert!(line.start.lon > 7.0 && line.start.lon < 7.008);
    }
}

// ── extension points ──

#[test]
fn custom_model_is_used() {
    struct CountingModel {
        inner: Wgs84,
        direct_calls: Cell<usize>,
    }

    impl GeodeticModel for CountingModel {
        fn direct(&self, start: &GeoPoint, azimuth: f64, distance: f64) -> Result<DirectSolution> {
            self.direct_calls.set(self.direct_calls.get() + 1);
            self.inner.direct(start, azimuth, distance)
        }

        fn to_cartesian(&self, point: &GeoPoint) -> Result<Point3> {
            self.inner.to_cartesian(point)
        }

        fn to_geographic(&self, point: &Point3) -> Result<GeoPoint> {
            self.inner.to_geographic(point)
        }
    }

    let model = CountingModel {
        inner: Wgs84::new().unwrap(),
        direct_calls: Cell::new(0),
    };
    let operation =
        ParallelHatching::with_model(model, unit_square(), options(40_000.0, 0.0, 0.0));
    let lines = operation.execute().unwrap();
    assert_eq!(lines.len(), 2);
    // Forward passes 0..=3 and reverse pass 1, one plane each.
    assert_eq!(operation.model.direct_calls.get(), 5);
}

#[test]
fn custom_pairing_is_used() {
    struct NoPairs;

    impl PairingStrategy for NoPairs {
        fn pair(&self, _crossings: &[Point3], _plane: &Plane) -> Vec<Segment3> {
            Vec::new()
        }
    }

    let lines = hatching(unit_square(), options(10_000.0, 0.0, 50.0))
        .with_pairing(NoPairs)
        .execute()
        .unwrap();
    assert!(lines.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let opts: HatchingOptions =
        serde_json::from_str(r#"{ "step": 250.0, "closure": "as_given" }"#).unwrap();
    assert_relative_eq!(opts.step, 250.0);
    assert_relative_eq!(opts.offset, 50.0);
    assert_eq!(opts.closure, RingClosure::AsGiven);
    assert_eq!(opts.degenerate, DegeneratePolicy::Skip);
}
