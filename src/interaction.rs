use crate::layout::Rect;

/// What the tooltip shows for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipTarget {
    pub name: String,
    pub category: String,
    pub value: String,
}

impl TooltipTarget {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category),
            format!("Value: {}", self.value),
        ]
    }
}

/// Invisible pointer target covering a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub bounds: Rect,
    pub target: TooltipTarget,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Shown {
        content: TooltipTarget,
        x: f64,
        y: f64,
    },
}

/// The single tooltip shared by every tile.
///
/// Transitions apply immediately; whichever event arrived last decides what
/// is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    state: TooltipState,
    offset: (f64, f64),
}

impl Tooltip {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self {
            state: TooltipState::Hidden,
            offset: (offset_x, offset_y),
        }
    }

    pub fn pointer_enter(&mut self, target: &TooltipTarget, pointer: (f64, f64)) {
        self.state = TooltipState::Shown {
            content: target.clone(),
            x: pointer.0 + self.offset.0,
            y: pointer.1 + self.offset.1,
        };
    }

    pub fn pointer_leave(&mut self) {
        self.state = TooltipState::Hidden;
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TooltipState::Shown { .. })
    }

    pub fn opacity(&self) -> f64 {
        if self.is_visible() { 1.0 } else { 0.0 }
    }

    /// Tooltip body, one line per field; empty while hidden.
    pub fn text(&self) -> String {
        match &self.state {
            TooltipState::Hidden => String::new(),
            TooltipState::Shown { content, .. } => content.lines().join("\n"),
        }
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match self.state {
            TooltipState::Hidden => None,
            TooltipState::Shown { x, y, .. } => Some((x, y)),
        }
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(20.0, -40.0)
    }
}

/// Turns raw pointer positions into enter/leave events on drawn overlays.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    overlays: Vec<Overlay>,
    hovered: Option<usize>,
    tooltip: Tooltip,
}

impl InteractionController {
    pub fn new(overlays: Vec<Overlay>, tooltip: Tooltip) -> Self {
        Self {
            overlays,
            hovered: None,
            tooltip,
        }
    }

    /// Swaps in the overlays of a freshly drawn scene and hides the tooltip.
    pub fn attach(&mut self, overlays: Vec<Overlay>) {
        self.overlays = overlays;
        self.hovered = None;
        self.tooltip.pointer_leave();
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<&Overlay> {
        self.hovered.and_then(|idx| self.overlays.get(idx))
    }

    /// Topmost overlay under the point; later overlays are drawn above.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.overlays
            .iter()
            .rposition(|overlay| overlay.bounds.contains(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let hit = self.hit_test(x, y);
        if hit == self.hovered {
            return;
        }
        if self.hovered.is_some() {
            self.tooltip.pointer_leave();
        }
        self.hovered = hit;
        if let Some(idx) = hit {
            let target = &self.overlays[idx].target;
            tracing::trace!(tile = %target.name, "pointer entered tile");
            self.tooltip.pointer_enter(target, (x, y));
        }
    }

    /// Direct event entry points, for hosts that deliver per-overlay events.
    pub fn pointer_enter(&mut self, overlay: usize, x: f64, y: f64) {
        if let Some(target) = self.overlays.get(overlay).map(|o| o.target.clone()) {
            self.hovered = Some(overlay);
            self.tooltip.pointer_enter(&target, (x, y));
        }
    }

    pub fn pointer_leave(&mut self, overlay: usize) {
        if overlay < self.overlays.len() {
            if self.hovered == Some(overlay) {
                self.hovered = None;
            }
            self.tooltip.pointer_leave();
        }
    }

    /// Pointer left the drawing surface altogether.
    pub fn pointer_exit(&mut self) {
        self.hovered = None;
        self.tooltip.pointer_leave();
    }
}
