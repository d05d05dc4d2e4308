//! End-to-end stylesheet rendering from on-disk resource trees.

use lacquer::{ThemeModel, Variant};
use lacquer_test::ResourceTree;

const MIDNIGHT: &str = r##"
name: Midnight
style: default
accent_color: "#722ED1"
variant: dark
resources: [arrow, close.svg]
overrides:
  border_radius_base: 6
  gutter: "^3"
dark:
  border_color: "#000"
light:
  border_color: "#FFF"
"##;

const DEFAULT_CSS: &str = "#include parts/button.css
QWidget { background: @background_color; color: @accent_color; }
QFrame { border: 1px solid @border_color; border-radius: @border_radius_basepx; }
QFrame[light=true] { border-color: @border_color[light]; }
QCheckBox::indicator { image: url(@check_icon); margin: @gutterpx; }
QLabel { color: @darkness; }";

const BUTTON_CSS: &str = "QPushButton { min-height: 24*DPIpx; }";

fn tree() -> ResourceTree {
    let tree = ResourceTree::new().unwrap();
    tree.theme("midnight", MIDNIGHT).unwrap();
    tree.style("default.css", DEFAULT_CSS).unwrap();
    tree.style("parts/button.css", BUTTON_CSS).unwrap();
    tree
}

#[test]
fn renders_full_pipeline() {
    let tree = tree();
    let icon = tree.icon("Midnight/check.png").unwrap();
    let resources = tree.setup().dpi(2.0).build().unwrap();

    let theme = resources.find_theme("midnight").unwrap();
    let theme = resources.theme(theme);
    let css = theme.lock().unwrap().stylesheet();

    assert!(css.contains("/*Included from: "));
    assert!(css.contains("QPushButton { min-height: 48px; }"));
    assert!(css.contains("QWidget { background: rgba(33,33,33,255); color: rgba(114,46,209,255); }"));
    assert!(css.contains("border: 1px solid rgba(0,0,0,255); border-radius: 6px;"));
    assert!(css.contains("border-color: rgba(255,255,255,255);"));
    assert!(css.contains(&format!("image: url({});", icon.display())));
    assert!(css.contains("margin: 6px;"));
    assert!(css.contains("QLabel { color: white; }"));
    assert!(!css.contains('@'));
}

#[test]
fn host_specific_stylesheet_wins() {
    let tree = tree();
    tree.style("default_maya2024.css", "QWidget { host: maya; }")
        .unwrap();

    let resources = tree.setup().host("maya", "2024").build().unwrap();
    let theme = resources.theme(tree.root().join("themes/midnight.yml"));
    assert_eq!(theme.lock().unwrap().stylesheet(), "QWidget { host: maya; }");

    let generic = tree.setup().host("houdini", "20").build().unwrap();
    let theme = generic.theme(tree.root().join("themes/midnight.yml"));
    assert!(theme.lock().unwrap().stylesheet().contains("QPushButton"));
}

#[test]
fn style_extension_is_configurable() {
    let tree = tree();
    tree.style("default.qss", "QWidget { qss: yes; }").unwrap();

    let resources = tree.setup().style_extension("qss").build().unwrap();
    let theme = resources.theme(tree.root().join("themes/midnight.yml"));
    assert_eq!(theme.lock().unwrap().stylesheet(), "QWidget { qss: yes; }");
}

#[test]
fn resource_directories_feed_options_and_icons() {
    let tree = tree();
    let theme_icon = tree
        .write("themes/resources/midnight/arrow.png", "")
        .unwrap();
    tree.style(
        "default.css",
        "a { image: url(@arrow_icon); } b { image: url(@close_icon); } c { x: @theme_resources; }",
    )
    .unwrap();

    let resources = tree.setup().build().unwrap();
    let theme = resources.theme(tree.root().join("themes/midnight.yml"));
    let model = theme.lock().unwrap();

    let theme_dir = model.theme_resources_dir().unwrap();
    assert_eq!(theme_dir, tree.root().join("themes/resources/midnight"));
    assert_eq!(
        model.style_resources_dir(),
        Some(tree.root().join("styles/resources/default"))
    );

    let css = model.stylesheet();
    assert!(css.contains(&format!("a {{ image: url({}); }}", theme_icon.display())));
    assert!(css.contains("b { image: url(close.svg); }"));
    assert!(css.contains(&format!("c {{ x: {}; }}", theme_dir.display())));
}

#[test]
fn light_variant_uses_light_overrides() {
    let tree = tree();
    let resources = tree.setup().variant(Variant::Light).build().unwrap();
    let theme = resources.theme(tree.root().join("themes/midnight.yml"));
    let model = theme.lock().unwrap();

    assert_eq!(model.variant(), Variant::Light);
    let css = model.stylesheet();
    assert!(css.contains("border: 1px solid rgba(255,255,255,255);"));
    assert!(css.contains("QWidget { background: rgba(248,248,249,255);"));
    assert!(css.contains("QLabel { color: black; }"));
}

#[test]
fn missing_stylesheet_renders_empty() {
    let tree = ResourceTree::new().unwrap();
    let file = tree.theme("bare", "name: Bare\nstyle: nowhere\n").unwrap();
    let resources = tree.setup().build().unwrap();

    let theme = resources.theme(&file);
    let model = theme.lock().unwrap();
    assert_eq!(model.style(), "nowhere");
    assert_eq!(model.stylesheet(), "");
    assert!(model.try_stylesheet().is_err());
    assert_eq!(model.style_resources_dir(), None);
}

#[test]
fn cyclic_includes_render_finitely() {
    let tree = ResourceTree::new().unwrap();
    tree.style("default.css", "#include a.css\nroot { }").unwrap();
    tree.style("a.css", "#include b.css\na { }").unwrap();
    tree.style("b.css", "#include a.css\nb { }").unwrap();

    let resources = tree.setup().build().unwrap();
    let model = ThemeModel::new().with_registry(resources.registry());
    let css = model.stylesheet();

    assert!(css.contains("a { }"));
    assert!(css.contains("b { }"));
    assert!(css.ends_with("root { }"));
}
