use omnibus::{
    catalogue::Catalogue,
    render::{Error, MapRenderer, RenderSettings, svg::Color},
    shared::geo::Coordinate,
};

fn settings() -> RenderSettings {
    RenderSettings {
        width: 600.0,
        height: 400.0,
        padding: 50.0,
        line_width: 14.0,
        stop_radius: 5.0,
        bus_label_font_size: 20,
        bus_label_offset: (7.0, 15.0),
        stop_label_font_size: 18,
        stop_label_offset: (7.0, -3.0),
        underlayer_color: Color::Rgba(255, 255, 255, 0.85),
        underlayer_width: 3.0,
        color_palette: vec![Color::Named("green".into()), Color::Rgb(255, 160, 0)],
    }
}

fn three_route_network() -> Catalogue {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Alpha", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("Beta", Coordinate::new(55.6, 37.7));
    catalogue.add_stop("Gamma", Coordinate::new(55.7, 37.8));
    catalogue
        .add_route("1", &["Alpha".into(), "Beta".into()], false)
        .unwrap();
    catalogue
        .add_route("2", &["Beta".into(), "Gamma".into()], false)
        .unwrap();
    catalogue
        .add_route(
            "3",
            &["Alpha".into(), "Gamma".into(), "Alpha".into()],
            true,
        )
        .unwrap();
    catalogue
}

fn polyline_lines(svg: &str) -> Vec<&str> {
    svg.lines()
        .filter(|line| line.trim_start().starts_with("<polyline"))
        .collect()
}

#[test]
fn palette_cycles_over_sorted_routes_test() {
    let catalogue = three_route_network();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();

    let polylines = polyline_lines(&svg);
    assert_eq!(polylines.len(), 3);
    assert!(polylines[0].contains("stroke=\"green\""));
    assert!(polylines[1].contains("stroke=\"rgb(255,160,0)\""));
    assert!(polylines[2].contains("stroke=\"green\""));
}

#[test]
fn out_and_back_route_gets_two_terminal_labels_test() {
    let catalogue = three_route_network();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();

    // Underlayer plus foreground per terminal: route "1" has distinct
    // endpoints so four texts, roundtrip "3" only two.
    assert_eq!(svg.matches(">1</text>").count(), 4);
    assert_eq!(svg.matches(">3</text>").count(), 2);
}

#[test]
fn line_with_matching_terminals_gets_one_label_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Alpha", Coordinate::new(55.5, 37.6));
    catalogue
        .add_route("8", &["Alpha".into()], false)
        .unwrap();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();
    assert_eq!(svg.matches(">8</text>").count(), 2);
}

#[test]
fn layers_keep_z_order_test() {
    let catalogue = three_route_network();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();

    let first_polyline = svg.find("<polyline").unwrap();
    let first_text = svg.find("<text").unwrap();
    let first_circle = svg.find("<circle").unwrap();
    let last_text = svg.rfind("<text").unwrap();

    assert!(first_polyline < first_text);
    assert!(first_text < first_circle);
    assert!(first_circle < last_text);
}

#[test]
fn unserved_stop_is_not_drawn_test() {
    let mut catalogue = three_route_network();
    catalogue.add_stop("Nowhere Lane", Coordinate::new(55.9, 37.9));
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();
    assert!(!svg.contains("Nowhere Lane"));
    assert_eq!(svg.matches("<circle").count(), 3);
}

#[test]
fn stop_names_are_escaped_test() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("Fish & Chips", Coordinate::new(55.5, 37.6));
    catalogue.add_stop("Beta", Coordinate::new(55.6, 37.7));
    catalogue
        .add_route("1", &["Fish & Chips".into(), "Beta".into()], false)
        .unwrap();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();
    assert!(svg.contains("Fish &amp; Chips"));
}

#[test]
fn svg_document_frame_test() {
    let catalogue = three_route_network();
    let settings = settings();
    let svg = MapRenderer::new(&catalogue, &settings).render();
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
    assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn settings_validation_test() {
    let mut too_padded = settings();
    too_padded.padding = 200.0;
    assert!(matches!(
        too_padded.validate(),
        Err(Error::PaddingTooLarge)
    ));

    let mut no_palette = settings();
    no_palette.color_palette.clear();
    assert!(matches!(no_palette.validate(), Err(Error::EmptyPalette)));

    let mut flat = settings();
    flat.height = 0.0;
    assert!(matches!(flat.validate(), Err(Error::InvalidCanvas)));

    assert!(settings().validate().is_ok());
}
