use std::path::Path;

use treemap_rs_renderer::config::{LayoutConfig, LegendConfig};
use treemap_rs_renderer::interaction::{InteractionController, Tooltip};
use treemap_rs_renderer::render::render_svg_with_tooltip;
use treemap_rs_renderer::{
    ColorTable, Config, Hierarchy, PositionedLeaf, RawNode, RenderOptions, TreemapError, layout,
    layout_with, render_legend_svg, render_with_options, run_pipeline,
};

const FIXTURES: [&str; 4] = [
    "two_categories.json",
    "weights.json",
    "video_games_sample.json",
    "zero_values.json",
];

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("{}: {err}", path.display()))
}

fn tree(name: &str) -> Hierarchy {
    Hierarchy::from_json(&fixture(name)).unwrap_or_else(|err| panic!("{name}: {err}"))
}

fn leaf_named<'a>(tree: &Hierarchy, leaves: &'a [PositionedLeaf], name: &str) -> &'a PositionedLeaf {
    leaves
        .iter()
        .find(|leaf| tree.node(leaf.node).name == name)
        .unwrap_or_else(|| panic!("no tile for {name}"))
}

#[test]
fn tiles_are_positive_and_disjoint() {
    for name in FIXTURES {
        let tree = tree(name);
        for padding in [0.0, 1.0, 4.0] {
            let leaves = layout(&tree, 1000.0, 600.0, padding).unwrap();
            for (idx, leaf) in leaves.iter().enumerate() {
                assert!(leaf.width() > 0.0 && leaf.height() > 0.0, "{name}: empty tile");
                assert!(leaf.x0 >= 0.0 && leaf.y0 >= 0.0, "{name}: tile before origin");
                assert!(leaf.x1 <= 1000.0 && leaf.y1 <= 600.0, "{name}: tile past bounds");
                for other in &leaves[idx + 1..] {
                    assert_eq!(
                        leaf.rect().intersection_area(&other.rect()),
                        0.0,
                        "{name}: overlapping tiles with padding {padding}"
                    );
                }
            }
        }
    }
}

#[test]
fn unpadded_tiles_cover_the_whole_surface() {
    for name in ["two_categories.json", "weights.json", "video_games_sample.json"] {
        let tree = tree(name);
        let leaves = layout(&tree, 1000.0, 600.0, 0.0).unwrap();
        let covered: f64 = leaves.iter().map(PositionedLeaf::area).sum();
        assert!((covered - 600_000.0).abs() < 1e-6, "{name}: covered {covered}");
    }
}

#[test]
fn padded_tiles_plus_gaps_fill_the_surface() {
    // Root, category and category region each give up half a padding per
    // side; growing every leaf by the other half closes the gaps between them.
    let tree = tree("weights.json");
    for (width, height, padding, round) in [
        (1000.0, 600.0, 1.0, true),
        (1000.0, 600.0, 4.0, true),
        (1000.0, 600.0, 1.0, false),
        (999.0, 601.0, 3.0, true),
    ] {
        let config = LayoutConfig {
            width,
            height,
            padding,
            round,
        };
        let leaves = layout_with(&tree, &config).unwrap();
        let cells: f64 = leaves
            .iter()
            .map(|leaf| (leaf.width() + padding) * (leaf.height() + padding))
            .sum();
        let expected = (width - 3.0 * padding) * (height - 3.0 * padding);
        assert!(
            (cells - expected).abs() < 1e-6,
            "{width}x{height} padding {padding}: cells {cells} expected {expected}"
        );
    }

    let leaves = layout(&tree, 1000.0, 600.0, 1.0).unwrap();
    let bare: f64 = leaves.iter().map(PositionedLeaf::area).sum();
    assert_eq!(bare, 592_025.0);
}

#[test]
fn areas_follow_the_weights() {
    let tree = tree("weights.json");
    let leaves = layout(&tree, 1000.0, 600.0, 1.0).unwrap();
    assert_eq!(leaves.len(), 4);
    for weight in [10.0, 20.0, 30.0, 40.0] {
        let leaf = leaf_named(&tree, &leaves, &format!("Item{weight}"));
        let share = leaf.area() / 600_000.0;
        let expected = weight / 100.0;
        assert!(
            (share - expected).abs() / expected < 0.05,
            "Item{weight}: share {share} expected {expected}"
        );
    }
}

#[test]
fn two_category_layout_matches_known_positions() {
    let tree = tree("two_categories.json");
    let leaves = layout(&tree, 400.0, 200.0, 1.0).unwrap();
    assert_eq!(leaves.len(), 2);

    let big = leaf_named(&tree, &leaves, "Leaf2");
    let small = leaf_named(&tree, &leaves, "Leaf1");
    assert_eq!((big.x0, big.y0, big.x1, big.y1), (2.0, 2.0, 298.0, 198.0));
    assert_eq!((small.x0, small.y0, small.x1, small.y1), (301.0, 2.0, 398.0, 198.0));
    let ratio = big.area() / small.area();
    assert!((ratio - 3.0).abs() < 0.1, "ratio {ratio}");
}

#[test]
fn layout_is_deterministic() {
    let json = fixture("video_games_sample.json");
    let first = render_with_options(&json, RenderOptions::default()).unwrap();
    let second = render_with_options(&json, RenderOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unrounded_layout_keeps_fractions() {
    let tree = tree("weights.json");
    let config = LayoutConfig {
        round: false,
        ..LayoutConfig::default()
    };
    let leaves = layout_with(&tree, &config).unwrap();
    assert!(leaves.iter().any(|leaf| leaf.x1.fract() != 0.0 || leaf.y1.fract() != 0.0));
}

#[test]
fn zero_valued_category_gets_no_tile_but_keeps_its_color() {
    let raw = RawNode::from_json(&fixture("zero_values.json")).unwrap();
    let rendered = run_pipeline(&raw, &Config::default()).unwrap();
    let names: Vec<&str> = rendered.scene.tiles.iter().map(|tile| tile.name.as_str()).collect();
    assert_eq!(names, ["Something", "Other"]);
    assert_eq!(rendered.colors.len(), 2);
    assert!(rendered.colors.color_for("Empty").is_some());
}

#[test]
fn colors_cycle_once_categories_outnumber_the_palette() {
    let tree = tree("video_games_sample.json");
    let palette = Config::default().theme.palette;
    let table = ColorTable::new(&tree, &palette).unwrap();
    assert_eq!(table.len(), 12);

    let entries: Vec<(&str, &str)> = table.entries().collect();
    assert_eq!(entries[0], ("Wii", palette[0].as_str()));
    assert_eq!(entries[1].0, "NES");
    assert_eq!(entries[palette.len()].1, entries[0].1);
}

#[test]
fn svg_exposes_tile_data_and_a_hidden_tooltip() {
    let json = fixture("video_games_sample.json");
    let svg = render_with_options(&json, RenderOptions::default()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("data-name=\"Wii Sports\""));
    assert!(svg.contains("data-category=\"Wii\""));
    assert!(svg.contains("data-value=\"82.53\""));
    assert!(svg.contains("<title>Name: Wii Sports\nCategory: Wii\nValue: 82.53</title>"));
    assert!(svg.contains("<g id=\"tooltip\" opacity=\"0\""));
    assert_eq!(svg.matches("id=\"tooltip\"").count(), 1);

    let tiles = svg.matches("class=\"tile\"").count();
    assert_eq!(svg.matches("class=\"tile-overlay\"").count(), tiles);
    assert_eq!(svg.matches("<clipPath").count(), tiles);
}

#[test]
fn hovered_tile_shows_in_the_tooltip() {
    let config = Config::default();
    let raw = RawNode::from_json(&fixture("two_categories.json")).unwrap();
    let rendered = run_pipeline(&raw, &config).unwrap();

    let mut interaction = InteractionController::new(rendered.scene.overlays(), Tooltip::default());
    let tile = rendered.scene.tiles[0].bounds;
    interaction.pointer_move(tile.x0 + 5.0, tile.y0 + 5.0);
    let svg = render_svg_with_tooltip(&rendered.scene, &config.theme, interaction.tooltip());
    assert!(svg.contains("<g id=\"tooltip\" opacity=\"1\""));
    assert!(svg.contains("Name: Leaf2"));

    interaction.pointer_exit();
    let svg = render_svg_with_tooltip(&rendered.scene, &config.theme, interaction.tooltip());
    assert!(svg.contains("<g id=\"tooltip\" opacity=\"0\""));
}

#[test]
fn legend_lists_categories_in_first_seen_order() {
    let tree = tree("video_games_sample.json");
    let config = Config::default();
    let table = ColorTable::new(&tree, &config.theme.palette).unwrap();
    let svg = render_legend_svg(&table, &config.theme, &LegendConfig::default());
    assert_eq!(svg.matches("class=\"legend-item\"").count(), 12);
    let wii = svg.find("data-category=\"Wii\"").unwrap();
    let n64 = svg.find("data-category=\"N64\"").unwrap();
    assert!(wii < n64);
}

#[test]
fn tableau_theme_changes_fills_only() {
    let json = fixture("two_categories.json");
    let pastel = render_with_options(&json, RenderOptions::pastel()).unwrap();
    let tableau = render_with_options(&json, RenderOptions::tableau()).unwrap();
    assert_ne!(pastel, tableau);
    assert_eq!(
        pastel.matches("class=\"tile\"").count(),
        tableau.matches("class=\"tile\"").count()
    );
}

#[test]
fn malformed_dataset_is_rejected() {
    let err = render_with_options(&fixture("malformed.json"), RenderOptions::default()).unwrap_err();
    assert!(matches!(err, TreemapError::MalformedTree { .. }), "{err:?}");

    assert!(err.is_structural());
}

#[test]
fn invalid_bounds_are_rejected() {
    let tree = tree("two_categories.json");
    assert!(matches!(
        layout(&tree, 0.0, 600.0, 1.0),
        Err(TreemapError::InvalidBounds { .. })
    ));
    assert!(matches!(
        layout(&tree, 1000.0, 600.0, -1.0),
        Err(TreemapError::InvalidBounds { .. })
    ));
}
