use crate::controller::Rendered;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub total: f64,
    pub categories: Vec<CategoryDump>,
    pub tiles: Vec<TileDump>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDump {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct TileDump {
    pub name: String,
    pub category: String,
    pub value: String,
    pub fill: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub label_lines: Vec<String>,
}

impl LayoutDump {
    pub fn from_rendered(rendered: &Rendered) -> Self {
        let categories = rendered
            .colors
            .entries()
            .map(|(name, color)| CategoryDump {
                name: name.to_string(),
                color: color.to_string(),
            })
            .collect();

        let tiles = rendered
            .scene
            .tiles
            .iter()
            .map(|tile| TileDump {
                name: tile.name.clone(),
                category: tile.category.clone(),
                value: tile.value.clone(),
                fill: tile.fill.clone(),
                x0: tile.bounds.x0,
                y0: tile.bounds.y0,
                x1: tile.bounds.x1,
                y1: tile.bounds.y1,
                label_lines: tile.label.iter().map(|line| line.text.clone()).collect(),
            })
            .collect();

        LayoutDump {
            width: rendered.scene.width,
            height: rendered.scene.height,
            total: rendered.tree.total(),
            categories,
            tiles,
        }
    }
}

pub fn write_layout_dump(path: &Path, rendered: &Rendered) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_rendered(rendered);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
