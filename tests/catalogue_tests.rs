use omnibus::{catalogue::Catalogue, shared::geo::Coordinate};

fn three_stops() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("B", Coordinate::new(55.6, 37.7));
    catalogue.add_stop("C", Coordinate::new(55.7, 37.8));
    catalogue
}

#[test]
fn roundtrip_expansion_test() {
    let mut catalogue = three_stops();
    catalogue
        .add_route("X", &["A".into(), "B".into(), "A".into()], true)
        .unwrap();
    let stats = catalogue.route_stats("X").unwrap();
    assert_eq!(stats.stops_count, 3);
    assert_eq!(stats.unique_stops_count, 2);
}

#[test]
fn out_and_back_expansion_test() {
    let mut catalogue = three_stops();
    catalogue
        .add_route("Y", &["A".into(), "B".into(), "C".into()], false)
        .unwrap();
    let stats = catalogue.route_stats("Y").unwrap();
    assert_eq!(stats.stops_count, 5);
    assert_eq!(stats.unique_stops_count, 3);
}

#[test]
fn out_and_back_distance_fallback_test() {
    let mut catalogue = three_stops();
    catalogue.set_distance("A", "B", 100).unwrap();
    catalogue.set_distance("B", "C", 200).unwrap();
    catalogue
        .add_route("Y", &["A".into(), "B".into(), "C".into()], false)
        .unwrap();
    // The return legs C->B and B->A fall back to the declared directions.
    let stats = catalogue.route_stats("Y").unwrap();
    assert_eq!(stats.road_length, 600.0);
}

#[test]
fn declared_both_directions_test() {
    let mut catalogue = three_stops();
    catalogue.set_distance("A", "B", 1000).unwrap();
    catalogue.set_distance("B", "A", 1500).unwrap();
    let a = catalogue.find_stop("A").unwrap().index;
    let b = catalogue.find_stop("B").unwrap().index;
    assert_eq!(catalogue.distance(a, b), 1000);
    assert_eq!(catalogue.distance(b, a), 1500);
}

#[test]
fn roundtrip_stats_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("B", Coordinate::new(55.6, 37.7));
    catalogue.set_distance("A", "B", 1000).unwrap();
    catalogue.set_distance("B", "A", 1500).unwrap();
    catalogue
        .add_route("X", &["A".into(), "B".into(), "A".into()], true)
        .unwrap();

    let stats = catalogue.route_stats("X").unwrap();
    assert_eq!(stats.stops_count, 3);
    assert_eq!(stats.unique_stops_count, 2);
    assert_eq!(stats.road_length, 2500.0);

    let a = catalogue.find_stop("A").unwrap().coordinate;
    let b = catalogue.find_stop("B").unwrap().coordinate;
    let geodesic = 2.0 * a.geodesic_distance(&b).as_meters();
    assert!((stats.curvature - 2500.0 / geodesic).abs() < 1e-9);
}

#[test]
fn missing_distance_is_zero_test() {
    let catalogue = three_stops();
    let a = catalogue.find_stop("A").unwrap().index;
    let c = catalogue.find_stop("C").unwrap().index;
    assert_eq!(catalogue.distance(a, c), 0);
}

#[test]
fn routes_at_sorted_unique_test() {
    let mut catalogue = three_stops();
    // Declared out of name order, and X visits B twice.
    catalogue
        .add_route("X", &["B".into(), "A".into(), "B".into()], true)
        .unwrap();
    catalogue
        .add_route("9", &["B".into(), "C".into()], false)
        .unwrap();

    let routes = catalogue.routes_at("B").unwrap();
    let names: Vec<&str> = routes.iter().map(|name| name.as_ref()).collect();
    assert_eq!(names, ["9", "X"]);
}

#[test]
fn isolated_stop_test() {
    let mut catalogue = three_stops();
    catalogue
        .add_route("Y", &["A".into(), "B".into()], false)
        .unwrap();
    assert_eq!(catalogue.routes_at("C").unwrap().len(), 0);
    assert!(catalogue.routes_at("Q").is_none());
}

#[test]
fn duplicate_stop_keeps_identity_test() {
    let mut catalogue = Catalogue::new();
    let first = catalogue.add_stop("A", Coordinate::new(55.5, 37.6));
    let second = catalogue.add_stop("A", Coordinate::new(60.0, 30.0));
    assert_eq!(first, second);
    assert_eq!(catalogue.stops().len(), 1);
    assert_eq!(
        catalogue.find_stop("A").unwrap().coordinate,
        Coordinate::new(60.0, 30.0)
    );
}

#[test]
fn unknown_route_stop_test() {
    let mut catalogue = three_stops();
    let result = catalogue.add_route("Y", &["A".into(), "Nowhere".into()], false);
    assert!(result.is_err());
}

#[test]
fn empty_route_test() {
    let mut catalogue = three_stops();
    assert!(catalogue.add_route("Y", &[], false).is_err());
}

#[test]
fn unknown_route_stats_test() {
    let catalogue = three_stops();
    assert!(catalogue.route_stats("Y").is_none());
}
