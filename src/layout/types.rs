use crate::hierarchy::NodeId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub(crate) fn collapsed(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Shrinks every side by `pad`; a side that would cross its opposite
    /// collapses onto the midpoint instead.
    pub fn inset(self, pad: f64) -> Self {
        let mut out = Self::new(self.x0 + pad, self.y0 + pad, self.x1 - pad, self.y1 - pad);
        if out.x1 < out.x0 {
            let mid = (out.x0 + out.x1) / 2.0;
            out.x0 = mid;
            out.x1 = mid;
        }
        if out.y1 < out.y0 {
            let mid = (out.y0 + out.y1) / 2.0;
            out.y0 = mid;
            out.y1 = mid;
        }
        out
    }

    pub(crate) fn round(self) -> Self {
        Self::new(self.x0.round(), self.y0.round(), self.x1.round(), self.y1.round())
    }

    /// Half-open containment, so neighbouring tiles never both claim a point.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }
}

/// A leaf's final (post-padding, rounded) rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedLeaf {
    #[serde(skip)]
    pub node: NodeId,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PositionedLeaf {
    pub(crate) fn new(node: NodeId, rect: Rect) -> Self {
        Self {
            node,
            x0: rect.x0,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}
