use super::*;

#[test]
fn fade_runs_from_transparent_to_opaque() {
    assert_eq!(fade_alpha(Duration::ZERO), 0.0);
    assert_eq!(fade_alpha(Duration::from_millis(500)), 0.5);
    assert_eq!(fade_alpha(Duration::from_secs(3)), 1.0);
}

#[test]
fn upright_word_is_centered() {
    let center = Pos2::new(100.0, 100.0);
    let galley = Vec2::new(40.0, 10.0);
    assert_eq!(text_origin(center, galley, 0.0), Pos2::new(80.0, 95.0));
    assert_eq!(word_rect(center, galley, 0.0), Rect::from_min_max(Pos2::new(80.0, 95.0), Pos2::new(120.0, 105.0)));
}

#[test]
fn rotated_word_box_is_transposed() {
    let center = Pos2::new(100.0, 100.0);
    let galley = Vec2::new(40.0, 10.0);
    let rect = word_rect(center, galley, 90.0);
    assert_eq!(rect.size(), Vec2::new(10.0, 40.0));
    assert_eq!(rect.center(), center);

    // Rotating the galley's top-left corner a quarter turn lands its box on `rect`
    let origin = text_origin(center, galley, 90.0);
    assert_eq!(origin, Pos2::new(105.0, 80.0));
    assert_eq!(rect.right(), origin.x);
    assert_eq!(rect.top(), origin.y);
}

#[test]
fn text_anchors_sit_on_the_baseline() {
    assert_eq!(text_align(Anchor::Start), Align2::LEFT_BOTTOM);
    assert_eq!(text_align(Anchor::Middle), Align2::CENTER_BOTTOM);
}

#[test]
fn any_year_gets_a_readable_label() {
    assert_eq!(year_label(&Year::any()), "All years");
    assert_eq!(year_label(&Year::new("1999")), "1999");
}
