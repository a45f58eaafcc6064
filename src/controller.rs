use crate::color::ColorTable;
use crate::config::Config;
use crate::dataset::{DatasetInfo, DatasetSource};
use crate::error::Result;
use crate::hierarchy::{Hierarchy, RawNode};
use crate::interaction::{InteractionController, Tooltip};
use crate::layout::layout_with;
use crate::scene::{Scene, Surface};

/// Identifies one dataset request; only the newest ticket may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { tiles: usize },
    /// The result belonged to a superseded selection and was dropped.
    Stale,
}

/// Everything one successful pipeline run produces.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub tree: Hierarchy,
    pub colors: ColorTable,
    pub scene: Scene,
}

/// hierarchy → layout → colors → scene. Nothing is drawn here.
pub fn run_pipeline(raw: &RawNode, config: &Config) -> Result<Rendered> {
    let tree = Hierarchy::build(raw)?;
    let leaves = layout_with(&tree, &config.layout)?;
    let colors = ColorTable::new(&tree, &config.theme.palette)?;
    let scene = Scene::build(
        &tree,
        &leaves,
        &colors,
        &config.scene,
        config.layout.width,
        config.layout.height,
    )?;
    Ok(Rendered {
        tree,
        colors,
        scene,
    })
}

/// Owns the active dataset selection and the state rendered from it.
pub struct TreemapController {
    config: Config,
    generation: u64,
    selected: Option<DatasetInfo>,
    current: Option<Rendered>,
    interaction: InteractionController,
}

impl TreemapController {
    pub fn new(config: Config) -> Self {
        let tooltip = Tooltip::new(config.scene.tooltip_offset_x, config.scene.tooltip_offset_y);
        Self {
            config,
            generation: 0,
            selected: None,
            current: None,
            interaction: InteractionController::new(Vec::new(), tooltip),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Makes `dataset` the active selection. Any ticket issued earlier is
    /// stale from now on.
    pub fn select(&mut self, dataset: DatasetInfo) -> FetchTicket {
        self.generation += 1;
        tracing::info!(title = %dataset.title, generation = self.generation, "dataset selected");
        self.selected = Some(dataset);
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Feeds a finished fetch back in. Failures leave the previous scene
    /// untouched.
    pub fn complete(&mut self, ticket: FetchTicket, fetched: Result<RawNode>) -> Result<RenderOutcome> {
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale dataset response"
            );
            return Ok(RenderOutcome::Stale);
        }
        let raw = fetched.inspect_err(|err| tracing::warn!(%err, "dataset fetch failed"))?;
        let tiles = self.render(&raw)?;
        Ok(RenderOutcome::Rendered { tiles })
    }

    /// Select, fetch and render in one synchronous step.
    pub fn load(&mut self, source: &dyn DatasetSource, dataset: DatasetInfo) -> Result<RenderOutcome> {
        let ticket = self.select(dataset.clone());
        let fetched = source.fetch(&dataset);
        self.complete(ticket, fetched)
    }

    /// Runs the pipeline on an already available tree and, on success,
    /// replaces the current scene.
    pub fn render(&mut self, raw: &RawNode) -> Result<usize> {
        let rendered = run_pipeline(raw, &self.config)
            .inspect_err(|err| tracing::warn!(%err, "render aborted"))?;
        let tiles = rendered.scene.tiles.len();
        self.interaction.attach(rendered.scene.overlays());
        self.current = Some(rendered);
        tracing::info!(tiles, "scene rendered");
        Ok(tiles)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        match &self.current {
            Some(rendered) => rendered.scene.draw(surface),
            None => surface.clear_scene(),
        }
    }

    pub fn selected(&self) -> Option<&DatasetInfo> {
        self.selected.as_ref()
    }

    pub fn current(&self) -> Option<&Rendered> {
        self.current.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref().map(|rendered| &rendered.scene)
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController {
        &mut self.interaction
    }
}
