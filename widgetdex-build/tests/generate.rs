//! End-to-end runs of the artifact generator over a fake Makepad checkout.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use widgetdex_build::scanner::scan_file;
use widgetdex_build::{
    Error, ExclusionPolicy, MakepadLayout, ScanOptions, generate_artifacts, index_locations, scan_widgets,
};

const BUTTON_RS: &str = "use crate::makepad_draw::*;

/// A pressable control.
#[derive(Live, Widget)]
pub struct Button {
    #[live] text: String,
    #[rust] dirty: bool,
}

#[derive(Live, LiveHook)]
pub struct DrawButton {
    #[live] hover: f32,
}

pub struct ButtonRef(WidgetRef);
";

const VIEW_RS: &str = "/// The base container.
#[derive(Live, Widget)]
pub struct View {
    #[live] pub padding: Padding,
    #[live(true)] show_bg: bool,
    #[live] flow: Flow,
    #[rust] area: Area,
}

#[derive(Live)]
pub enum Size {
    #[pick] Fill,
    Fit,
}
";

const CX_2D_RS: &str = "use crate::*;

#[derive(Clone, Copy, Debug, Live, LiveHook)]
pub struct Walk {
    #[live] pub width: Size,
}
";

fn window_rs() -> String {
    let mut text = String::new();
    for _ in 0..40 {
        text.push_str("// filler\n");
    }
    text.push_str("#[derive(Live, Widget)]\npub struct Window {\n    #[live] last_mouse_pos: DVec2,\n}\n");
    text
}

/// Lay out `<tmp>/makepad/{widgets/src,draw/src}` and return the checkout root.
fn fake_checkout(temp_dir: &TempDir) -> PathBuf {
    let root = temp_dir.path().join("makepad");
    let widgets_src = root.join("widgets/src");
    let draw_src = root.join("draw/src");
    fs::create_dir_all(&widgets_src).unwrap();
    fs::create_dir_all(&draw_src).unwrap();

    fs::write(widgets_src.join("button.rs"), BUTTON_RS).unwrap();
    fs::write(widgets_src.join("view.rs"), VIEW_RS).unwrap();
    fs::write(widgets_src.join("window.rs"), window_rs()).unwrap();
    fs::write(widgets_src.join(".scratch.rs"), "#[derive(Live, Widget)]\npub struct Scratch {}\n").unwrap();
    fs::write(widgets_src.join("notes.md"), "#[derive(Live, Widget)]\npub struct Notes {}\n").unwrap();
    fs::write(draw_src.join("cx_2d.rs"), CX_2D_RS).unwrap();
    root
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============ Scanning ============

#[test]
fn test_empty_root_gives_empty_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");

    let report = generate_artifacts()
        .makepad_root(temp_dir.path().join("missing"))
        .docs_file(out.join("WIDGETS.md"))
        .locations_file(out.join("locations.json"))
        .run()
        .expect("generation should succeed");

    assert_eq!(report.widgets, 0);
    assert_eq!(
        fs::read_to_string(out.join("WIDGETS.md")).unwrap(),
        "# Makepad Widgets Reference\n\nAuto-generated from Makepad source code.\n\n## Table of Contents\n\n\n---\n\n"
    );
    assert_eq!(
        read_json(&out.join("locations.json")),
        serde_json::json!({"widgets": {}, "properties": {}})
    );
}

#[test]
fn test_button_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);

    let widgets = scan_file(&root.join("widgets/src/button.rs"), &ExclusionPolicy::default()).unwrap();

    assert_eq!(widgets.len(), 1);
    let button = &widgets[0];
    assert_eq!(button.name, "Button");
    assert_eq!(button.file, "button.rs");
    assert_eq!(button.doc, "A pressable control.");
    assert_eq!(button.properties.len(), 1);
    assert_eq!(button.properties[0].name, "text");
    assert_eq!(button.properties[0].prop_type, "String");
    assert_eq!(button.properties[0].default, None);
}

#[test]
fn test_scan_skips_hidden_and_foreign_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);

    let catalog = scan_widgets(&root.join("widgets/src"), &ScanOptions::default()).unwrap();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["Button", "View", "Window"]);

    let view = catalog.get("View").unwrap();
    assert_eq!(view.properties.len(), 3);
    assert_eq!(view.properties[1].default.as_deref(), Some("true"));
}

#[test]
fn test_duplicate_names_keep_later_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a_first.rs"),
        "/// First.\n#[derive(Live, Widget)]\npub struct Twin {}\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("b_second.rs"),
        "/// Second.\n#[derive(Live, Widget)]\npub struct Twin {}\n",
    )
    .unwrap();

    let catalog = scan_widgets(temp_dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Twin").unwrap().file, "b_second.rs");
    assert_eq!(catalog.get("Twin").unwrap().doc, "Second.");
}

#[test]
fn test_exclusion_is_total() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let layout = MakepadLayout::new(&root);

    let catalog = scan_widgets(&layout.widgets_src(), &ScanOptions::default()).unwrap();
    let index = index_locations(&layout, &ScanOptions::default()).unwrap();

    for name in ["DrawButton", "ButtonRef"] {
        assert!(!catalog.contains(name));
        assert!(!index.widgets.contains_key(name));
    }

    let allow_all = ScanOptions {
        exclude: ExclusionPolicy::allow_all(),
        ..Default::default()
    };
    let catalog = scan_widgets(&layout.widgets_src(), &allow_all).unwrap();
    assert!(catalog.contains("DrawButton"));
}

#[test]
fn test_unreadable_source_aborts_scan() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let layout = MakepadLayout::new(&root);
    let bad = layout.widgets_src().join("bad.rs");
    fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

    let scanned = scan_widgets(&layout.widgets_src(), &ScanOptions::default());
    assert!(matches!(&scanned, Err(Error::Read { path, .. }) if path == &bad), "{scanned:?}");

    let indexed = index_locations(&layout, &ScanOptions::default());
    assert!(matches!(&indexed, Err(Error::Read { path, .. }) if path == &bad), "{indexed:?}");

    let report = generate_artifacts().makepad_root(&root).docs_file(temp_dir.path().join("WIDGETS.md")).run();
    assert!(matches!(report, Err(Error::Read { .. })));
    assert!(!temp_dir.path().join("WIDGETS.md").exists());
}

// ============ Locations ============

#[test]
fn test_location_index() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let layout = MakepadLayout::new(&root);

    let index = index_locations(&layout, &ScanOptions::default()).unwrap();

    let window = &index.widgets["Window"];
    assert_eq!(window.line, 42);
    assert!(window.file.ends_with("window.rs"));
    assert_eq!(index.widgets["Button"].line, 5);
    assert_eq!(index.widgets["View"].line, 3);

    assert_eq!(index.properties["padding"].line, 4);
    assert_eq!(index.properties["show_bg"].line, 5);
    assert!(index.properties["width"].file.ends_with("cx_2d.rs"));
    assert_eq!(index.properties["width"].line, 4);
    assert_eq!(index.properties["height"].line, 4);

    assert!(index.values.is_empty());
}

#[test]
fn test_value_locations_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let options = ScanOptions {
        index_values: true,
        ..Default::default()
    };

    let index = index_locations(&MakepadLayout::new(&root), &options).unwrap();

    assert_eq!(index.values.len(), 1);
    assert_eq!(index.values["Fill"].line, 12);
}

#[test]
fn test_missing_view_file_leaves_properties_empty() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("makepad");
    fs::create_dir_all(root.join("widgets/src")).unwrap();
    fs::write(root.join("widgets/src/window.rs"), window_rs()).unwrap();

    let index = index_locations(&MakepadLayout::new(&root), &ScanOptions::default()).unwrap();

    assert_eq!(index.widgets.len(), 1);
    assert!(index.properties.is_empty());
}

// ============ Full generation ============

#[test]
fn test_generate_all_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let out = temp_dir.path().join("out");

    let report = generate_artifacts()
        .makepad_root(&root)
        .snippets_file(out.join("snippets/makepad.json"))
        .docs_file(out.join("docs/WIDGETS.md"))
        .locations_file(out.join("locations.json"))
        .hover_file(out.join("hover.json"))
        .run()
        .expect("generation should succeed");

    assert_eq!(report.widgets, 3);
    assert_eq!(report.written.len(), 4);
    let counts = report.snippets.unwrap();
    assert_eq!(counts.widgets, 3);
    assert_eq!(counts.total, 50);
    assert_eq!(report.locations.unwrap().widgets, 3);

    let snippets = read_json(&out.join("snippets/makepad.json"));
    assert_eq!(snippets["Button Widget"]["prefix"], "mpbutton");
    assert_eq!(snippets["Button Widget"]["description"], "A pressable control.");
    assert_eq!(snippets["Window Widget"]["description"], "Makepad Window widget");
    assert_eq!(snippets["Width Fill"]["body"], "width: Fill");

    let docs = fs::read_to_string(out.join("docs/WIDGETS.md")).unwrap();
    assert!(docs.contains("- [Button](#button)\n- [View](#view)\n- [Window](#window)\n"));
    assert!(docs.contains("| `show_bg` | `bool` | true |"));

    let hover = read_json(&out.join("hover.json"));
    assert_eq!(hover["widgets"]["Window"]["source"], "window.rs:42");
    assert_eq!(hover["widgets"]["Button"]["source"], "button.rs:5");
    assert!(hover["widgets"]["Image"].get("source").is_none());
    assert_eq!(hover["properties"]["flow"]["type"], "Flow");
}

#[test]
fn test_second_run_rewrites_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let out = temp_dir.path().join("out");

    let run = || {
        generate_artifacts()
            .makepad_root(&root)
            .snippets_file(out.join("makepad.json"))
            .docs_file(out.join("WIDGETS.md"))
            .run()
            .expect("generation should succeed")
    };

    let first = run();
    let docs = fs::read_to_string(out.join("WIDGETS.md")).unwrap();
    let second = run();

    assert_eq!(first.written.len(), 2);
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 2);
    assert_eq!(fs::read_to_string(out.join("WIDGETS.md")).unwrap(), docs);
}

#[test]
fn test_widgets_src_override() {
    let temp_dir = TempDir::new().unwrap();
    let root = fake_checkout(&temp_dir);
    let out = temp_dir.path().join("out");

    let report = generate_artifacts()
        .widgets_src(root.join("widgets/src"))
        .locations_file(out.join("locations.json"))
        .run()
        .expect("generation should succeed");

    assert_eq!(report.widgets_src, root.join("widgets/src"));
    let locations = read_json(&out.join("locations.json"));
    assert_eq!(locations["properties"]["width"]["line"], 4);
}
