use nodedoc::color::{Color, Rgb8, parse_color};
use nodedoc::config::{ColorConfig, Normalization, Templates};
use nodedoc::generator::Palette;
use nodedoc::generator::css::stylesheet;

fn max_normalized() -> ColorConfig {
    ColorConfig {
        normalization: Normalization::Max,
        ..ColorConfig::default()
    }
}

#[test]
fn scales_normalizes_then_rounds() {
    let orange = Color::new(1.0, 0.5, 0.0);
    // 1.5 × → (1.5, 0.75, 0) → ÷ 1.5 → (1, 0.5, 0) → 255 × → 127.5 rounds up.
    assert_eq!(orange.to_rgb8(&ColorConfig::default()), Rgb8(255, 128, 0));
    assert_eq!(orange.to_rgb8(&ColorConfig::default()).to_string(), "255, 128, 0");
}

#[test]
fn dim_colours_depend_on_normalization() {
    let dim = Color::new(0.5, 0.25, 0.0);
    // (0.75, 0.375, 0) stays under 1.0, so clamp-to-unit leaves it as is.
    assert_eq!(dim.to_rgb8(&ColorConfig::default()), Rgb8(191, 96, 0));
    // Max normalization stretches the brightest channel to 255.
    assert_eq!(dim.to_rgb8(&max_normalized()), Rgb8(255, 128, 0));
}

#[test]
fn black_is_safe_under_max_normalization() {
    assert_eq!(Color::default().to_rgb8(&max_normalized()), Rgb8(0, 0, 0));
    assert_eq!(Color::default().to_rgb8(&ColorConfig::default()), Rgb8(0, 0, 0));
}

const PALETTE: &str = r##"{
  "impulses": { "Call": [0.0, 1.0, 0.0], "Continuation": "white" },
  "operations": { "sync": [0.0, 0.0, 1.0], "async": [1.0, 0.0, 0.0] },
  "types": { "Single": [0.0, 0.5, 0.0], "List`1": "#808080" }
}"##;

#[test]
fn stylesheet_rule_order() {
    let palette: Palette = serde_json::from_str(PALETTE).unwrap();
    let css = stylesheet(&palette, &ColorConfig::default(), &Templates::default());

    assert!(css.starts_with("/****"));
    let order = [
        ".PFN-Call {",
        ".PFN-Continuation {",
        ".PFN-SyncOperation {",
        ".PFN-AsyncOperation {",
        ".PFN-MixedOperation {",
        ".PFN-Single {",
        ".PFN-List_1 {",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|rule| css.find(rule).unwrap_or_else(|| panic!("missing {rule}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert_eq!(css.matches(".PFN-").count(), order.len());
}

#[test]
fn mixed_operation_blends_sync_and_async() {
    let palette: Palette = serde_json::from_str(PALETTE).unwrap();
    let css = stylesheet(&palette, &ColorConfig::default(), &Templates::default());
    // (0.5, 0, 0.5) × 1.5 = (0.75, 0, 0.75), under 1.0.
    assert!(css.contains(".PFN-MixedOperation {\n  stroke: rgb(191, 0, 191);"));
    assert!(css.contains(".PFN-Continuation {\n  stroke: rgb(255, 255, 255);"));
}

#[test]
fn palette_rejects_bad_colours() {
    let bad = r#"{ "operations": { "sync": "nope", "async": [1, 0, 0] } }"#;
    assert!(serde_json::from_str::<Palette>(bad).is_err());
}

#[test]
fn hex_colours_need_three_or_six_digits() {
    assert_eq!(parse_color("#fff"), Some(Color::new(1.0, 1.0, 1.0)));
    assert_eq!(parse_color("#FFFFFF"), parse_color("#fff"));
    assert_eq!(parse_color("#f00"), Some(Color::new(1.0, 0.0, 0.0)));
    assert_eq!(parse_color("#ffffffff"), None);
    assert_eq!(parse_color("#ffff"), None);
    assert_eq!(parse_color("#"), None);
    assert_eq!(parse_color("#+12345"), None);
}
