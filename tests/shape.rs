// tests/shape.rs
use glam::Vec2;
use lsystem_turtle::{Color, DrawOp, LsysError, RecordingCanvas, Shape, ShapeConfig};
use std::collections::BTreeMap;

#[test]
fn test_default_shape_is_koch_snowflake() {
    let mut shape = Shape::new(ShapeConfig::default()).with_context(RecordingCanvas::new());

    assert_eq!(shape.system().generation(), 3);
    assert_eq!(shape.turtle().config().length, 25.0);
    assert_eq!(shape.turtle().config().instructions, shape.system().current());

    shape.render().unwrap();
    let canvas = shape.turtle().context().unwrap();
    assert_eq!(canvas.segments().len(), 3 * 4usize.pow(3));
    assert_eq!(canvas.stack_depth(), 0);
    assert_eq!(shape.time(), 1);
}

#[test]
fn test_shape_is_placed_at_root() {
    let config = ShapeConfig {
        axiom: "F".into(),
        rules: BTreeMap::new(),
        generations: 0,
        length: 10.0,
        root: Vec2::new(100.0, 50.0),
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::new();
    let mut shape: Shape = Shape::new(config);
    shape.render_to(&mut canvas).unwrap();

    let seg = &canvas.segments()[0];
    assert!(seg.from.abs_diff_eq(Vec2::new(100.0, 50.0), 1e-5));
    assert!(seg.to.abs_diff_eq(Vec2::new(110.0, 50.0), 1e-5));
    assert_eq!(canvas.ops()[1], DrawOp::StrokeColor(Color::gray(200.0)));
}

#[test]
fn test_update_spins_the_shape() {
    let config = ShapeConfig {
        axiom: "F".into(),
        generations: 0,
        length: 1.0,
        spin: std::f32::consts::FRAC_PI_2,
        ..Default::default()
    };
    let mut shape = Shape::new(config).with_context(RecordingCanvas::new());

    shape.update();
    assert_eq!(shape.rotation(), std::f32::consts::FRAC_PI_2);
    shape.render().unwrap();

    let seg = &shape.turtle().context().unwrap().segments()[0];
    assert!(seg.to.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-5));
}

#[test]
fn test_shape_without_context_fails() {
    let mut shape: Shape = Shape::new(ShapeConfig::default());
    assert!(matches!(shape.render(), Err(LsysError::NoRenderTarget)));
    assert_eq!(shape.time(), 0);
}

#[test]
fn test_invalid_sentence_surfaces_from_render() {
    let config = ShapeConfig {
        axiom: "A".into(),
        rules: BTreeMap::from([('A', "F+A".to_string())]),
        generations: 2,
        ..Default::default()
    };
    let mut shape = Shape::new(config).with_context(RecordingCanvas::new());

    assert!(matches!(
        shape.render(),
        Err(LsysError::InvalidTurtleAction('A'))
    ));
    let canvas = shape.turtle().context().unwrap();
    assert_eq!(canvas.segments().len(), 2);
    assert_eq!(canvas.stack_depth(), 0);
    assert_eq!(shape.time(), 0);
}

#[test]
fn test_shape_config_from_json() {
    let config = ShapeConfig::from_json(
        r#"{ "axiom": "F", "rules": { "F": "FF" }, "generations": 2, "palette": "ignored" }"#,
    )
    .unwrap();
    assert_eq!(config.scale_factor, 0.5);

    let shape: Shape = Shape::new(config);
    assert_eq!(shape.system().current(), "FFFF");
    assert_eq!(shape.turtle().config().length, 50.0);
}

#[test]
fn test_shape_config_rejects_multi_symbol_keys() {
    let result = ShapeConfig::from_json(r#"{ "rules": { "FF": "F" } }"#);
    assert!(matches!(result, Err(LsysError::Config(_))));
}
