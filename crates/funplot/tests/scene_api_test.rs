//! Integration tests for the Scene API
//!
//! These tests go through the public API only: building drawables, combining
//! them, and rendering or saving scenes.

use float_cmp::assert_approx_eq;

use funplot::{
    Curve, DomainError, Drawable, DrawableGroup, ExprError, Figure, FunplotError, Function,
    ImageFormat, Points, SaveOptions, Scene, SeriesKind, config::AppConfig,
};

fn labels(figure: &Figure) -> Vec<String> {
    figure
        .series()
        .iter()
        .filter_map(|series| series.label().map(str::to_string))
        .collect()
}

fn curve(label: &str) -> Curve {
    Curve::new(vec![0.0, 1.0], vec![1.0, 0.0]).with_label(label)
}

#[test]
fn test_sum_renders_left_then_right() {
    let mut figure = Figure::default();
    (curve("a") + curve("b")).render(&mut figure);
    assert_eq!(labels(&figure), ["a", "b"]);
}

#[test]
fn test_single_plus_group_prepends() {
    let group = curve("x") + curve("y");
    let mut figure = Figure::default();
    (curve("s") + group).render(&mut figure);
    assert_eq!(labels(&figure), ["s", "x", "y"]);
}

#[test]
fn test_mixed_drawables_keep_kinds() {
    let f = Function::parse("x")
        .unwrap()
        .with_domain([0.0, 1.0])
        .unwrap();
    let p = Points::new(vec![0.5], vec![0.5]);
    let mut figure = Figure::default();
    (f + p).render(&mut figure);

    let kinds = figure.series().iter().map(|s| s.kind()).collect::<Vec<_>>();
    assert!(matches!(kinds[0], SeriesKind::Line { .. }));
    assert!(matches!(kinds[1], SeriesKind::Scatter { .. }));
}

#[test]
fn test_parabola_values() {
    let f = Function::parse("x**2")
        .unwrap()
        .with_domain((-2.0, 2.0, 5))
        .unwrap();
    assert_eq!(f.values(), [4.0, 1.0, 0.0, 1.0, 4.0]);
}

#[test]
fn test_two_variables_is_arity_error() {
    let err = Function::parse("x+y").unwrap_err();
    match err {
        ExprError::Arity { variables } => assert_eq!(variables, ["x", "y"]),
        other => panic!("expected an arity error, got {other:?}"),
    }
}

#[test]
fn test_constant_substitution() {
    let f = Function::parse("sin(pi * x)").unwrap();
    let symbols = f.expression().unwrap().free_symbols();
    assert_eq!(symbols.len(), 1);
    assert_approx_eq!(f64, f.eval(1.0), 0.0, epsilon = 1e-12);
}

#[test]
fn test_empty_domain() {
    let err = Function::parse("x")
        .unwrap()
        .with_domain(Vec::<f64>::new())
        .unwrap_err();
    assert_eq!(err, DomainError::Empty);
    assert!(matches!(FunplotError::from(err), FunplotError::Domain(_)));
}

#[test]
fn test_scene_add_preserves_options() {
    let scene = Scene::new().title("Scene title").xlim(-1.0, 1.0);
    let extended = &scene + curve("added");

    assert!(scene.group().is_empty());
    assert_eq!(extended.group().len(), 1);
    assert_eq!(
        extended.options().collect::<Vec<_>>(),
        scene.options().collect::<Vec<_>>()
    );
}

#[test]
fn test_scene_to_svg() {
    let scene = Scene::from(curve("line")).title("Scene title").legend(true);
    let svg = scene.to_svg().unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("Scene title"));
    assert!(svg.contains("line"));
}

#[test]
fn test_save_twice_writes_independent_files() {
    let dir = tempfile::tempdir().unwrap();
    let scene = Scene::from(curve("a") + curve("b")).grid(true);

    let first = dir.path().join("first.svg");
    let second = dir.path().join("second.png");
    scene.save(&first).unwrap();
    scene.save(&second).unwrap();

    let svg = std::fs::read_to_string(&first).unwrap();
    assert!(svg.starts_with("<svg"));
    let png = std::fs::read(&second).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_save_with_explicit_format_and_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.out");
    let options = SaveOptions::new()
        .with_format(ImageFormat::Jpeg)
        .with_dpi(50.0)
        .with_quality(70);

    Scene::from(curve("a")).save_with(&path, &options).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_config_drives_figure_size() {
    let config = AppConfig::from_toml_str(
        r#"
        [figure]
        width = 4.0
        height = 3.0
        dpi = 50
        "#,
    )
    .unwrap();
    let figure = Scene::new().with_config(config).figure().unwrap();
    let size = figure.size_px();
    assert_approx_eq!(f32, size.width(), 200.0);
    assert_approx_eq!(f32, size.height(), 150.0);
}

#[test]
fn test_group_accumulates() {
    let mut group = DrawableGroup::new();
    group += curve("a");
    group += curve("b") + curve("c");
    let figure = Scene::from(group).figure().unwrap();
    assert_eq!(labels(&figure), ["a", "b", "c"]);
}

#[test]
fn test_deeply_nested_expression_is_syntax_error() {
    let source = format!("{}x{}", "(".repeat(500), ")".repeat(500));
    assert!(matches!(Function::parse(&source), Err(ExprError::Syntax(_))));

    let source = format!("{}x", "x+".repeat(5_000));
    assert!(matches!(Function::parse(&source), Err(ExprError::Syntax(_))));
}

#[test]
fn test_unusable_config_is_an_error() {
    let err = AppConfig::from_toml_str("[figure]\nfont_size = 0.0").unwrap_err();
    assert!(matches!(err, FunplotError::Config(_)));

    let mut figure_config = funplot::config::FigureConfig::default();
    figure_config.set_dpi(0.0);
    let config = AppConfig::new(figure_config, Default::default());
    let err = Scene::from(curve("a")).with_config(config).to_svg().unwrap_err();
    assert!(matches!(err, FunplotError::Config(_)));
}

#[test]
fn test_oversized_domain_is_rejected() {
    let err = Function::parse("x")
        .unwrap()
        .with_domain((0.0, 1.0, usize::MAX))
        .unwrap_err();
    assert!(matches!(err, DomainError::TooManySamples { .. }));
}
