use omnibus::{
    catalogue::Catalogue,
    router::{RoutingSettings, TransitRouter, itinerary::RouteItem},
    shared::geo::Coordinate,
};

fn settings() -> RoutingSettings {
    // 60 km/h is 1000 m/min, which keeps expected times easy to read.
    RoutingSettings {
        bus_wait_time: 6,
        bus_velocity: 60.0,
    }
}

fn line_network() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("B", Coordinate::new(55.6, 37.7));
    catalogue.add_stop("C", Coordinate::new(55.7, 37.8));
    catalogue.set_distance("A", "B", 100).unwrap();
    catalogue.set_distance("B", "C", 200).unwrap();
    catalogue
        .add_route("Y", &["A".into(), "B".into(), "C".into()], false)
        .unwrap();
    catalogue
}

#[test]
fn identity_query_test() {
    let catalogue = line_network();
    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("A", "A").unwrap();
    assert_eq!(itinerary.total_time, 0.0);
    assert!(itinerary.items.is_empty());
}

#[test]
fn minimal_trip_test() {
    let catalogue = line_network();
    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("A", "C").unwrap();

    assert!((itinerary.total_time - 6.3).abs() < 1e-9);
    assert_eq!(itinerary.items.len(), 2);
    match &itinerary.items[0] {
        RouteItem::Wait { stop_name, time } => {
            assert_eq!(stop_name.as_ref(), "A");
            assert_eq!(*time, 6.0);
        }
        other => panic!("expected a wait first, got {other:?}"),
    }
    match &itinerary.items[1] {
        RouteItem::Ride {
            bus,
            span_count,
            time,
        } => {
            assert_eq!(bus.as_ref(), "Y");
            assert_eq!(*span_count, 2);
            assert!((time - 0.3).abs() < 1e-9);
        }
        other => panic!("expected a ride second, got {other:?}"),
    }
}

#[test]
fn return_trip_uses_fallback_distances_test() {
    let catalogue = line_network();
    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("C", "A").unwrap();
    assert!((itinerary.total_time - 6.3).abs() < 1e-9);
}

#[test]
fn itinerary_times_sum_to_total_test() {
    let catalogue = line_network();
    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("A", "C").unwrap();
    let sum: f64 = itinerary.items.iter().map(RouteItem::time).sum();
    assert!((itinerary.total_time - sum).abs() < 1e-9);
}

#[test]
fn itinerary_alternates_wait_and_ride_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.50, 37.60));
    catalogue.add_stop("B", Coordinate::new(55.51, 37.61));
    catalogue.add_stop("C", Coordinate::new(55.52, 37.62));
    catalogue.set_distance("A", "B", 1000).unwrap();
    catalogue.set_distance("B", "C", 1000).unwrap();
    catalogue
        .add_route("1", &["A".into(), "B".into()], false)
        .unwrap();
    catalogue
        .add_route("2", &["B".into(), "C".into()], false)
        .unwrap();

    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("A", "C").unwrap();
    assert!(!itinerary.items.is_empty());
    for (i, item) in itinerary.items.iter().enumerate() {
        if i % 2 == 0 {
            assert!(matches!(item, RouteItem::Wait { .. }), "item {i} should be a wait");
        } else {
            assert!(matches!(item, RouteItem::Ride { .. }), "item {i} should be a ride");
        }
    }
}

#[test]
fn transfer_costs_second_wait_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.50, 37.60));
    catalogue.add_stop("B", Coordinate::new(55.51, 37.61));
    catalogue.add_stop("C", Coordinate::new(55.52, 37.62));
    catalogue.set_distance("A", "B", 1000).unwrap();
    catalogue.set_distance("B", "C", 1000).unwrap();
    catalogue
        .add_route("1", &["A".into(), "B".into()], false)
        .unwrap();
    catalogue
        .add_route("2", &["B".into(), "C".into()], false)
        .unwrap();

    let router = TransitRouter::new(&catalogue, settings());
    let itinerary = router.find_route("A", "C").unwrap();
    // Two boardings of 6 plus 1 km on each route.
    assert!((itinerary.total_time - 14.0).abs() < 1e-9);
}

#[test]
fn unknown_stop_test() {
    let catalogue = line_network();
    let router = TransitRouter::new(&catalogue, settings());
    assert!(router.find_route("A", "Nowhere").is_none());
    assert!(router.find_route("Nowhere", "A").is_none());
}

#[test]
fn unreachable_stop_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("B", Coordinate::new(55.6, 37.7));
    catalogue.add_stop("D", Coordinate::new(55.9, 37.9));
    catalogue.set_distance("A", "B", 100).unwrap();
    catalogue
        .add_route("Y", &["A".into(), "B".into()], false)
        .unwrap();

    let router = TransitRouter::new(&catalogue, settings());
    assert!(router.find_route("A", "D").is_none());
}

#[test]
fn settings_validation_test() {
    assert!(
        RoutingSettings {
            bus_wait_time: 0,
            bus_velocity: 60.0
        }
        .validate()
        .is_err()
    );
    assert!(
        RoutingSettings {
            bus_wait_time: 6,
            bus_velocity: 0.0
        }
        .validate()
        .is_err()
    );
    assert!(settings().validate().is_ok());
}
