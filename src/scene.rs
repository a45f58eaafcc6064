use crate::color::{ColorTable, category_of, color_of};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::hierarchy::{Hierarchy, NodeId};
use crate::interaction::{Overlay, TooltipTarget};
use crate::label::{LabelLine, label_lines};
use crate::layout::{PositionedLeaf, Rect};

/// Drawing capability the scene is rendered through.
///
/// `draw_rect`, `draw_text` and `draw_overlay` are called once per tile, in
/// that order, after a single `clear_scene`.
pub trait Surface {
    fn clear_scene(&mut self);
    fn draw_rect(&mut self, tile: &Tile);
    fn draw_text(&mut self, tile: &Tile, lines: &[LabelLine]);
    fn draw_overlay(&mut self, tile: &Tile);
}

/// Everything needed to draw one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub leaf: NodeId,
    pub bounds: Rect,
    pub fill: String,
    pub name: String,
    pub category: String,
    pub value: String,
    pub label: Vec<LabelLine>,
}

impl Tile {
    pub fn target(&self) -> TooltipTarget {
        TooltipTarget {
            name: self.name.clone(),
            category: self.category.clone(),
            value: self.value.clone(),
        }
    }
}

/// A fully resolved treemap, ready to be drawn on any surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub tiles: Vec<Tile>,
}

impl Scene {
    /// Resolves colors and labels for every leaf up front; any failure
    /// returns before a single draw call is made.
    pub fn build(
        tree: &Hierarchy,
        leaves: &[PositionedLeaf],
        table: &ColorTable,
        config: &SceneConfig,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        let mut tiles = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let node = tree.node(leaf.node);
            let fill = color_of(tree, leaf.node, table)?.to_string();
            let category = match node.category.as_deref() {
                Some(category) => category.to_string(),
                None => tree.node(category_of(tree, leaf.node)?).name.clone(),
            };
            tiles.push(Tile {
                leaf: leaf.node,
                bounds: leaf.rect(),
                fill,
                name: node.name.clone(),
                category,
                value: node
                    .value_text
                    .clone()
                    .unwrap_or_else(|| format_value(node.sum)),
                label: label_lines(
                    &node.name,
                    config.label_inset_x,
                    config.label_first_baseline,
                    config.label_line_height,
                ),
            });
        }
        tracing::debug!(tiles = tiles.len(), "built scene");
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_scene();
        for tile in &self.tiles {
            surface.draw_rect(tile);
            surface.draw_text(tile, &tile.label);
            surface.draw_overlay(tile);
        }
    }

    pub fn overlays(&self) -> Vec<Overlay> {
        self.tiles
            .iter()
            .map(|tile| Overlay {
                bounds: tile.bounds,
                target: tile.target(),
            })
            .collect()
    }
}

/// Integral values print without a fraction (`10`, `82.53`).
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        bounds: Rect,
        fill: String,
    },
    Text {
        origin: (f64, f64),
        lines: Vec<LabelLine>,
    },
    Overlay(Overlay),
}

/// Headless surface that records draw calls.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
    pub clears: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> Vec<Overlay> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Overlay(overlay) => Some(overlay.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &str)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect { bounds, fill } => Some((bounds, fill.as_str())),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn clear_scene(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn draw_rect(&mut self, tile: &Tile) {
        self.commands.push(DrawCommand::Rect {
            bounds: tile.bounds,
            fill: tile.fill.clone(),
        });
    }

    fn draw_text(&mut self, tile: &Tile, lines: &[LabelLine]) {
        self.commands.push(DrawCommand::Text {
            origin: (tile.bounds.x0, tile.bounds.y0),
            lines: lines.to_vec(),
        });
    }

    fn draw_overlay(&mut self, tile: &Tile) {
        self.commands.push(DrawCommand::Overlay(Overlay {
            bounds: tile.bounds,
            target: tile.target(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::RawNode;
    use crate::layout::layout;
    use crate::theme::Theme;

    fn build(raw: &RawNode) -> (Hierarchy, Scene) {
        let tree = Hierarchy::build(raw).unwrap();
        let leaves = layout(&tree, 400.0, 200.0, 1.0).unwrap();
        let table = ColorTable::new(&tree, &Theme::pastel().palette).unwrap();
        let scene = Scene::build(&tree, &leaves, &table, &SceneConfig::default(), 400.0, 200.0)
            .unwrap();
        (tree, scene)
    }

    fn dataset() -> RawNode {
        RawNode::branch(
            "root",
            vec![
                RawNode::branch("A", vec![RawNode::leaf("Leaf1", 10.0, "A")]),
                RawNode::branch("B", vec![RawNode::leaf("Leaf2", 30.0, "B")]),
            ],
        )
    }

    #[test]
    fn draws_rect_text_and_overlay_per_tile() {
        let (_, scene) = build(&dataset());
        let mut surface = DisplayList::new();
        scene.draw(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.commands.len(), 6);
        assert!(matches!(surface.commands[0], DrawCommand::Rect { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::Text { .. }));
        assert!(matches!(surface.commands[2], DrawCommand::Overlay(_)));
        let fills: Vec<_> = surface.rects().map(|(_, fill)| fill.to_string()).collect();
        assert_ne!(fills[0], fills[1]);
    }

    #[test]
    fn redraw_replaces_the_previous_scene() {
        let (_, scene) = build(&dataset());
        let mut surface = DisplayList::new();
        scene.draw(&mut surface);
        scene.draw(&mut surface);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.overlays().len(), 2);
    }

    #[test]
    fn overlays_cover_the_tile_exactly() {
        let (_, scene) = build(&dataset());
        let mut surface = DisplayList::new();
        scene.draw(&mut surface);
        for (overlay, tile) in surface.overlays().iter().zip(&scene.tiles) {
            assert_eq!(overlay.bounds, tile.bounds);
            assert_eq!(overlay.target.name, tile.name);
        }
    }

    #[test]
    fn missing_category_falls_back_to_the_ancestor() {
        let raw = RawNode::branch(
            "root",
            vec![RawNode::branch(
                "Tabletop Games",
                vec![RawNode {
                    name: "Pebble Time".to_string(),
                    value: Some(20338986.0.into()),
                    category: None,
                    children: None,
                }],
            )],
        );
        let (_, scene) = build(&raw);
        assert_eq!(scene.tiles[0].category, "Tabletop Games");
        assert_eq!(scene.tiles[0].value, "20338986");
        assert_eq!(scene.tiles[0].label[0].text, "Pebble ");
    }

    #[test]
    fn foreign_color_table_aborts_before_drawing() {
        let tree = Hierarchy::build(&dataset()).unwrap();
        let leaves = layout(&tree, 400.0, 200.0, 1.0).unwrap();
        let table = ColorTable::from_names(["A"], &Theme::pastel().palette).unwrap();
        let result = Scene::build(&tree, &leaves, &table, &SceneConfig::default(), 400.0, 200.0);
        assert!(result.is_err());
    }

    #[test]
    fn tile_value_keeps_the_dataset_text() {
        let raw = RawNode::from_json(
            r#"{"name":"root","children":[{"name":"Design","children":[
                {"name":"Coolest Cooler","category":"Design","value":"0.10"},
                {"name":"Pebble Time","category":"Design","value":2}]}]}"#,
        )
        .unwrap();
        let (_, scene) = build(&raw);
        let values: Vec<&str> = scene.tiles.iter().map(|tile| tile.value.as_str()).collect();
        assert_eq!(values, ["2", "0.10"]);
        assert_eq!(scene.tiles[1].target().lines()[2], "Value: 0.10");
    }

    #[test]
    fn values_are_formatted_compactly() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(82.53), "82.53");
    }
}
