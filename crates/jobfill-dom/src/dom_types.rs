//! Shared DOM types: viewport, bounding box, and dispatched events.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Viewport information for in-view checks and scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportInfo {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Scroll X offset.
    pub scroll_x: f64,
    /// Scroll Y offset.
    pub scroll_y: f64,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl ViewportInfo {
    /// The visible region in document coordinates.
    pub fn visible_area(&self) -> BoundingBox {
        BoundingBox {
            x: self.scroll_x,
            y: self.scroll_y,
            width: self.width as f64,
            height: self.height as f64,
        }
    }
}

/// Bounding box for an element, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box with no rendered area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Get the center point of this bounding box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if this box intersects with another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Check if this box is visible in the scrolled viewport.
    pub fn is_visible_in_viewport(&self, viewport: &ViewportInfo) -> bool {
        !self.is_empty() && self.intersects(&viewport.visible_area())
    }
}

/// Synthetic events the filler dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Click,
    Input,
    Change,
    Blur,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
            Self::Blur => "blur",
        }
    }

    /// Whether the event bubbles to ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }
}

/// One dispatched event, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}
