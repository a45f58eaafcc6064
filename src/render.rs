use crate::color::ColorTable;
use crate::config::{LegendConfig, RenderConfig};
use crate::interaction::{Tooltip, TooltipState};
use crate::label::LabelLine;
use crate::scene::{Scene, Surface, Tile};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const TOOLTIP_LINE_HEIGHT: f64 = 14.0;
const TOOLTIP_PADDING: f64 = 6.0;
const TOOLTIP_WIDTH: f64 = 220.0;

/// SVG markup surface. Every tile is emitted with absolute coordinates and
/// exposes `data-name`, `data-category` and `data-value` for inspection.
pub struct SvgSurface<'a> {
    theme: &'a Theme,
    width: f64,
    height: f64,
    body: String,
    tiles: usize,
}

impl<'a> SvgSurface<'a> {
    pub fn new(width: f64, height: f64, theme: &'a Theme) -> Self {
        Self {
            theme,
            width,
            height,
            body: String::new(),
            tiles: 0,
        }
    }

    /// Closes the document; `tooltip` decides what the shared tooltip element
    /// shows (nothing and fully transparent while hidden).
    pub fn finish(self, tooltip: &Tooltip) -> String {
        let theme = self.theme;
        let width = self.width;
        let height = self.height;
        let mut svg = String::with_capacity(self.body.len() + 512);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"{}\" font-size=\"{}\">",
            escape_xml(&theme.font_family),
            theme.font_size
        ));
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            theme.background
        ));
        svg.push_str(&self.body);
        svg.push_str(&tooltip_svg(tooltip, theme));
        svg.push_str("</svg>");
        svg
    }
}

impl Surface for SvgSurface<'_> {
    fn clear_scene(&mut self) {
        self.body.clear();
        self.tiles = 0;
    }

    fn draw_rect(&mut self, tile: &Tile) {
        self.tiles += 1;
        let b = tile.bounds;
        self.body.push_str(&format!(
            "<rect class=\"tile\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"1\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\"/>",
            b.x0,
            b.y0,
            b.width(),
            b.height(),
            tile.fill,
            escape_xml(&tile.name),
            escape_xml(&tile.category),
            escape_xml(&tile.value)
        ));
        self.body.push_str(&format!(
            "<clipPath id=\"clip-{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            self.tiles,
            b.x0,
            b.y0,
            b.width(),
            b.height()
        ));
    }

    fn draw_text(&mut self, tile: &Tile, lines: &[LabelLine]) {
        let b = tile.bounds;
        self.body.push_str(&format!(
            "<text class=\"tile-text\" clip-path=\"url(#clip-{})\" fill=\"{}\" pointer-events=\"none\">",
            self.tiles, self.theme.text_color
        ));
        for line in lines {
            self.body.push_str(&format!(
                "<tspan x=\"{:.2}\" y=\"{:.2}\">{}</tspan>",
                b.x0 + line.x,
                b.y0 + line.y,
                escape_xml(&line.text)
            ));
        }
        self.body.push_str("</text>");
    }

    fn draw_overlay(&mut self, tile: &Tile) {
        let b = tile.bounds;
        self.body.push_str(&format!(
            "<rect class=\"tile-overlay\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"transparent\" pointer-events=\"all\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\"><title>{}</title></rect>",
            b.x0,
            b.y0,
            b.width(),
            b.height(),
            escape_xml(&tile.name),
            escape_xml(&tile.category),
            escape_xml(&tile.value),
            escape_xml(&tile.target().lines().join("\n"))
        ));
    }
}

pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    render_svg_with_tooltip(scene, theme, &Tooltip::default())
}

pub fn render_svg_with_tooltip(scene: &Scene, theme: &Theme, tooltip: &Tooltip) -> String {
    let mut surface = SvgSurface::new(scene.width, scene.height, theme);
    scene.draw(&mut surface);
    surface.finish(tooltip)
}

fn tooltip_svg(tooltip: &Tooltip, theme: &Theme) -> String {
    let TooltipState::Shown { content, x, y } = tooltip.state() else {
        return "<g id=\"tooltip\" opacity=\"0\" pointer-events=\"none\"></g>".to_string();
    };
    let lines = content.lines();
    let box_height = TOOLTIP_PADDING * 2.0 + TOOLTIP_LINE_HEIGHT * lines.len() as f64;
    let mut svg = format!(
        "<g id=\"tooltip\" opacity=\"{}\" pointer-events=\"none\" transform=\"translate({x:.2}, {y:.2})\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\">",
        tooltip.opacity(),
        escape_xml(&content.name),
        escape_xml(&content.category),
        escape_xml(&content.value)
    );
    svg.push_str(&format!(
        "<rect width=\"{TOOLTIP_WIDTH:.2}\" height=\"{box_height:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\" fill-opacity=\"0.9\" stroke=\"{}\" stroke-width=\"0.8\"/>",
        theme.background, theme.text_color
    ));
    for (idx, line) in lines.iter().enumerate() {
        let line_y = TOOLTIP_PADDING + TOOLTIP_LINE_HEIGHT * (idx as f64 + 1.0) - 3.0;
        svg.push_str(&format!(
            "<text x=\"{TOOLTIP_PADDING:.2}\" y=\"{line_y:.2}\" fill=\"{}\">{}</text>",
            theme.text_color,
            escape_xml(line)
        ));
    }
    svg.push_str("</g>");
    svg
}

/// Category swatches in first-seen order, filled row by row.
pub fn render_legend_svg(table: &ColorTable, theme: &Theme, config: &LegendConfig) -> String {
    let width = config.width;
    let height = config.height;
    let columns = config.columns.max(1);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"legend\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"{}\" font-size=\"{}\">",
        escape_xml(&theme.font_family),
        theme.font_size
    );
    for (idx, (name, color)) in table.entries().enumerate() {
        let x = config.inset + (idx % columns) as f64 * config.column_width;
        let y = config.inset + (idx / columns) as f64 * config.row_height;
        let size = config.swatch_size;
        svg.push_str(&format!(
            "<g class=\"legend-entry\"><rect class=\"legend-item\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{size:.2}\" height=\"{size:.2}\" fill=\"{color}\" data-category=\"{}\"/>",
            escape_xml(name)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\">{}</text></g>",
            x + size + 5.0,
            y + size - 3.0,
            theme.text_color,
            escape_xml(name)
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_font_family(&theme.font_family);
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(1000.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(feature = "png")]
fn primary_font_family(families: &str) -> String {
    families
        .split(',')
        .map(|family| family.trim().trim_matches('"'))
        .find(|family| !family.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
