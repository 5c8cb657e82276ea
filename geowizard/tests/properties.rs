use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geowizard::geowizard_types::dms::{Axis, Direction, Dms};
use geowizard::geowizard_types::{validate, Component};
use geowizard::{
    convert, Coordinate, CoordinateFrame, EditError, EditSession, GeoPoint2d, Geometry,
    GeometryError, GeometryKind, Hemisphere, MeasurementEngine, MeasurementPolicy, UtmZone,
    ValidationError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn zone_18n() -> UtmZone {
    UtmZone::new(18, Hemisphere::North).expect("valid zone")
}

fn frames_for(point: &GeoPoint2d) -> [CoordinateFrame; 4] {
    [
        CoordinateFrame::Utm(UtmZone::containing(point)),
        CoordinateFrame::GeographicDecimal,
        CoordinateFrame::GeographicDms,
        CoordinateFrame::WebMercator,
    ]
}

fn known_square() -> Vec<Coordinate> {
    let zone = zone_18n();
    vec![
        Coordinate::utm(zone, 500_000.0, 4_649_676.0),
        Coordinate::utm(zone, 500_100.0, 4_649_676.0),
        Coordinate::utm(zone, 500_100.0, 4_649_776.0),
        Coordinate::utm(zone, 500_000.0, 4_649_776.0),
    ]
}

fn assert_round_trip(sample: &GeoPoint2d, frames: &[CoordinateFrame]) {
    let sample = Coordinate::latlon(sample.lat(), sample.lon());
    for &from in frames {
        let source = convert(&sample, from)
            .unwrap_or_else(|err| panic!("{sample:?} into {from}: {err}"));
        let epsilon = if from.is_projected() { 1e-3 } else { 1e-6 };
        for &to in frames {
            let there = convert(&source, to)
                .unwrap_or_else(|err| panic!("{source:?} into {to}: {err}"));
            let back = convert(&there, from)
                .unwrap_or_else(|err| panic!("{there:?} into {from}: {err}"));
            assert_abs_diff_eq!(back, source, epsilon = epsilon);
        }
    }
}

#[test]
fn round_trip_between_all_frames() {
    init_logger();
    let samples = [
        GeoPoint2d::latlon(40.7128, -74.006),
        GeoPoint2d::latlon(42.0, -75.0),
        GeoPoint2d::latlon(0.5, -73.5),
        GeoPoint2d::latlon(10.25, -76.9),
        // Southern hemisphere
        GeoPoint2d::latlon(-33.8688, 151.2093),
        GeoPoint2d::latlon(-12.05, -77.04),
        GeoPoint2d::latlon(-0.5, 36.8),
        // Close to the Mercator limit
        GeoPoint2d::latlon(85.05, 10.0),
        GeoPoint2d::latlon(-85.05, -120.0),
        // Close to the edges of zone 18
        GeoPoint2d::latlon(10.0, -77.999),
        GeoPoint2d::latlon(-10.0, -72.001),
    ];

    for sample in &samples {
        assert_round_trip(sample, &frames_for(sample));
    }
}

#[test]
fn round_trip_on_the_antimeridian() {
    init_logger();
    let frames = [
        CoordinateFrame::GeographicDecimal,
        CoordinateFrame::GeographicDms,
        CoordinateFrame::WebMercator,
    ];

    for sample in [
        GeoPoint2d::latlon(0.0, 180.0),
        GeoPoint2d::latlon(0.0, -180.0),
        GeoPoint2d::latlon(-45.0, 180.0),
        GeoPoint2d::latlon(60.0, -180.0),
    ] {
        assert_round_trip(&sample, &frames);
    }
}

#[test]
fn area_does_not_depend_on_vertex_order() {
    init_logger();
    let engine = MeasurementEngine::default();
    let forward = Geometry::new(GeometryKind::Polygon, &known_square()).unwrap();
    let mut reversed_coords = known_square();
    reversed_coords.reverse();
    let reversed = Geometry::new(GeometryKind::Polygon, &reversed_coords).unwrap();

    for policy in [
        MeasurementPolicy::Planar { zone: None },
        MeasurementPolicy::Geodesic,
    ] {
        let a = engine.measure(&forward, policy).unwrap();
        let b = engine.measure(&reversed, policy).unwrap();
        assert!(a.area.unwrap() > 0.0);
        assert_abs_diff_eq!(a.area.unwrap(), b.area.unwrap(), epsilon = 1e-6);
        assert_abs_diff_eq!(a.perimeter.unwrap(), b.perimeter.unwrap(), epsilon = 1e-6);
    }
}

#[test]
fn minimum_vertex_invariant() {
    init_logger();
    let square = known_square();
    assert_matches!(
        Geometry::new(GeometryKind::Polygon, &square[..2]),
        Err(GeometryError::InsufficientVertices {
            kind: GeometryKind::Polygon,
            required: 3,
            actual: 2
        })
    );

    let triangle = Geometry::new(GeometryKind::Polygon, &square[..3]).unwrap();
    let mut session = EditSession::new(triangle);
    for index in 0..3 {
        assert_matches!(
            session.remove_vertex(index),
            Err(EditError::WouldViolateMinimum { required: 3, .. })
        );
    }
    assert_eq!(session.snapshot().len(), 3);
    assert!(!session.can_undo());
}

#[test]
fn range_boundaries() {
    assert!(validate(&Coordinate::latlon(90.0, 0.0)).is_valid());
    assert_matches!(
        validate(&Coordinate::latlon(90.000_000_1, 0.0)).into_result(),
        Err(ValidationError::OutOfRange {
            component: Component::Latitude,
            ..
        })
    );

    assert!(validate(&Coordinate::latlon(0.0, -180.0)).is_valid());
    assert_matches!(
        validate(&Coordinate::latlon(0.0, -180.000_000_1)).into_result(),
        Err(ValidationError::OutOfRange {
            component: Component::Longitude,
            ..
        })
    );
}

#[test]
fn known_utm_square() {
    init_logger();
    let square = Geometry::new(GeometryKind::Polygon, &known_square()).unwrap();
    let measurement = MeasurementEngine::default()
        .measure(&square, MeasurementPolicy::Planar { zone: None })
        .unwrap();

    assert_abs_diff_eq!(measurement.area.unwrap(), 10_000.0, epsilon = 1e-3);
    assert_abs_diff_eq!(measurement.perimeter.unwrap(), 400.0, epsilon = 1e-3);

    let explicit = MeasurementEngine::default()
        .measure(
            &square,
            MeasurementPolicy::for_frame(CoordinateFrame::Utm(zone_18n())),
        )
        .unwrap();
    assert_eq!(explicit, measurement);
}

#[test]
fn undo_restores_previous_vertex_exactly() {
    init_logger();
    let square = Geometry::new(GeometryKind::Polygon, &known_square()).unwrap();
    let original = *square.vertex(0).unwrap();
    let mut session = EditSession::new(square);

    session
        .move_vertex(0, &Coordinate::web_mercator(-8_237_000.0, 5_012_000.0))
        .unwrap();
    assert!(session.undo().unwrap());

    let restored = *session.snapshot().vertex(0).unwrap();
    assert_eq!(restored.position().lat().to_bits(), original.position().lat().to_bits());
    assert_eq!(restored.position().lon().to_bits(), original.position().lon().to_bits());
    assert_eq!(restored.authored_in(), CoordinateFrame::Utm(zone_18n()));
}

#[test]
fn dms_of_half_degree() {
    let dms = Dms::from_decimal(45.5, Axis::Latitude);
    assert_eq!(dms, Dms::new(45.0, 30.0, 0.0, Direction::North));
    assert_eq!(dms.to_decimal(), 45.5);

    let coord = convert(
        &Coordinate::latlon(45.5, -45.5),
        CoordinateFrame::GeographicDms,
    )
    .unwrap();
    assert_matches!(
        coord,
        Coordinate::GeographicDms { lat, lon }
            if lat.to_decimal() == 45.5 && lon.to_decimal() == -45.5
    );
}
