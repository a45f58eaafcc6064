#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod hierarchy;
pub mod interaction;
pub mod label;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use color::{ColorTable, color_of};
pub use config::{Config, LayoutConfig, SceneConfig};
pub use controller::{FetchTicket, RenderOutcome, Rendered, TreemapController, run_pipeline};
pub use dataset::{DatasetInfo, DatasetPreset, DatasetSource};
pub use error::{Result, TreemapError};
pub use hierarchy::{Hierarchy, NodeId, RawNode};
pub use layout::{PositionedLeaf, Rect, layout, layout_with};
pub use render::{render_legend_svg, render_svg};
pub use scene::{DisplayList, Scene, Surface};
pub use theme::Theme;

/// Layout, theme and label settings for one-shot rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
}

impl RenderOptions {
    pub fn pastel() -> Self {
        Self::default()
    }

    pub fn tableau() -> Self {
        let mut config = Config::default();
        config.theme = Theme::tableau();
        Self { config }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.config.layout.width = width;
        self.config.layout.height = height;
        self
    }
}

/// Renders a dataset document straight to SVG.
pub fn render_with_options(json: &str, options: RenderOptions) -> Result<String> {
    let raw = RawNode::from_json(json)?;
    let rendered = run_pipeline(&raw, &options.config)?;
    Ok(render_svg(&rendered.scene, &options.config.theme))
}
