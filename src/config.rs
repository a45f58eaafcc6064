use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Gap between sibling rectangles; each side of a tile gives up half.
    pub padding: f64,
    /// Snap coordinates to whole pixels once the whole tree is positioned.
    pub round: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            padding: 1.0,
            round: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub label_inset_x: f64,
    pub label_first_baseline: f64,
    pub label_line_height: f64,
    pub tooltip_offset_x: f64,
    pub tooltip_offset_y: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            label_inset_x: 3.0,
            label_first_baseline: 13.0,
            label_line_height: 10.0,
            tooltip_offset_x: 20.0,
            tooltip_offset_y: -40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub width: f64,
    pub height: f64,
    pub columns: usize,
    pub column_width: f64,
    pub row_height: f64,
    pub swatch_size: f64,
    pub inset: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            columns: 3,
            column_width: 200.0,
            row_height: 25.0,
            swatch_size: 15.0,
            inset: 10.0,
        }
    }
}

/// Raster size for PNG output. The background is painted by the SVG itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub scene: SceneConfig,
    pub legend: LegendConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    text_color: Option<String>,
    background: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreemapConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    padding: Option<f64>,
    round: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelConfigFile {
    inset_x: Option<f64>,
    first_baseline: Option<f64>,
    line_height: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TooltipConfigFile {
    offset_x: Option<f64>,
    offset_y: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    columns: Option<usize>,
    column_width: Option<f64>,
    row_height: Option<f64>,
    swatch_size: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    treemap: Option<TreemapConfigFile>,
    labels: Option<LabelConfigFile>,
    tooltip: Option<TooltipConfigFile>,
    legend: Option<LegendConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f64) {
            config.theme.font_size = v as f32;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.palette {
            if v.is_empty() {
                return Err(anyhow::anyhow!("themeVariables.palette must not be empty"));
            }
            config.theme.palette = v;
        }
    }

    if let Some(treemap) = parsed.treemap {
        if let Some(v) = treemap.width {
            config.layout.width = v;
        }
        if let Some(v) = treemap.height {
            config.layout.height = v;
        }
        if let Some(v) = treemap.padding {
            config.layout.padding = v;
        }
        if let Some(v) = treemap.round {
            config.layout.round = v;
        }
    }

    if let Some(labels) = parsed.labels {
        if let Some(v) = labels.inset_x {
            config.scene.label_inset_x = v;
        }
        if let Some(v) = labels.first_baseline {
            config.scene.label_first_baseline = v;
        }
        if let Some(v) = labels.line_height {
            config.scene.label_line_height = v;
        }
    }

    if let Some(tooltip) = parsed.tooltip {
        if let Some(v) = tooltip.offset_x {
            config.scene.tooltip_offset_x = v;
        }
        if let Some(v) = tooltip.offset_y {
            config.scene.tooltip_offset_y = v;
        }
    }

    if let Some(legend) = parsed.legend {
        if let Some(v) = legend.width {
            config.legend.width = v;
        }
        if let Some(v) = legend.height {
            config.legend.height = v;
        }
        if let Some(v) = legend.columns {
            config.legend.columns = v.max(1);
        }
        if let Some(v) = legend.column_width {
            config.legend.column_width = v;
        }
        if let Some(v) = legend.row_height {
            config.legend.row_height = v;
        }
        if let Some(v) = legend.swatch_size {
            config.legend.swatch_size = v;
        }
    }

    config.render.width = config.layout.width as f32;
    config.render.height = config.layout.height as f32;

    Ok(config)
}
