//! Transient panel geometry.
//!
//! The panel's position is never stored as a rectangle. Like a CSS box it is
//! an anchor point (`left`/`top`) followed by a list of translations, plus an
//! optional explicit size once the user has resized it. The presentation
//! layer resolves it against the current viewport every frame, which keeps
//! percentage-based positions correct across terminal resizes.

use std::fmt;

use ratatui::layout::Rect;

/// Signed rectangle origin with unsigned size. Panels slide in from above the
/// viewport, so their origin is routinely negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (c, r) = (column as i32, row as i32);
        c >= self.x
            && c < self.x + self.width as i32
            && r >= self.y
            && r < self.y + self.height as i32
    }

    /// The part of this rectangle that is on screen.
    pub fn clip(&self, bounds: Rect) -> Rect {
        let x0 = self.x.max(bounds.x as i32);
        let y0 = self.y.max(bounds.y as i32);
        let x1 = (self.x + self.width as i32).min(bounds.right() as i32);
        let y1 = (self.y + self.height as i32).min(bounds.bottom() as i32);
        if x1 <= x0 || y1 <= y0 {
            return Rect::new(bounds.x, bounds.y, 0, 0);
        }
        Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
    }

    pub fn lerp(from: FloatRect, to: FloatRect, t: f64) -> FloatRect {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| (a + (b - a) * t).round();
        FloatRect {
            x: mix(from.x as f64, to.x as f64) as i32,
            y: mix(from.y as f64, to.y as f64) as i32,
            width: mix(from.width as f64, to.width as f64) as u16,
            height: mix(from.height as f64, to.height as f64) as u16,
        }
    }
}

/// A translation length along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Percentage of the panel's own extent (`%` inside `translate`).
    SelfPercent(f64),
    /// Percentage of the viewport extent (`vw` / `vh`).
    Viewport(f64),
    /// `min(100v - 100%, n v)`: a viewport percentage capped so the panel's
    /// far edge never passes the viewport edge.
    ClampedViewport(f64),
}

impl Length {
    pub const ZERO: Length = Length::Viewport(0.0);

    fn resolve(self, viewport: i32, own: i32) -> f64 {
        match self {
            Length::SelfPercent(p) => own as f64 * p / 100.0,
            Length::Viewport(p) => viewport as f64 * p / 100.0,
            Length::ClampedViewport(p) => {
                let cap = (viewport - own) as f64;
                (viewport as f64 * p / 100.0).min(cap)
            }
        }
    }

    fn fmt_axis(&self, f: &mut fmt::Formatter<'_>, unit: &str) -> fmt::Result {
        match self {
            Length::SelfPercent(p) => write!(f, "{p}%"),
            Length::Viewport(p) if *p == 0.0 => write!(f, "0"),
            Length::Viewport(p) => write!(f, "{p}{unit}"),
            Length::ClampedViewport(p) => write!(f, "min(100{unit} - 100%, {p:.2}{unit})"),
        }
    }
}

/// One `translate(x, y)` step of the transform list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub x: Length,
    pub y: Length,
}

impl Translate {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Pull the panel up by one full viewport height.
    pub const fn offscreen_up() -> Self {
        Self::new(Length::ZERO, Length::Viewport(-100.0))
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("translate(")?;
        self.x.fmt_axis(f, "vw")?;
        f.write_str(", ")?;
        self.y.fmt_axis(f, "vh")?;
        f.write_str(")")
    }
}

/// Where the untranslated panel's top-left corner sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Viewport centre (`left: 50%; top: 50%`).
    Center,
    /// Viewport origin (`left: 0; top: 0`); set once the panel is dragged.
    Origin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub anchor: Anchor,
    pub transform: Vec<Translate>,
    /// Explicit size in cells once a resize happened. Not clamped, so it can
    /// be zero or negative.
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Geometry {
    /// Canonical closed geometry: centred horizontally, fully above the top
    /// edge, intrinsic size.
    pub fn offscreen() -> Self {
        Self {
            anchor: Anchor::Center,
            transform: vec![Translate::new(
                Length::SelfPercent(-50.0),
                Length::Viewport(-100.0),
            )],
            width: None,
            height: None,
        }
    }

    pub fn centered_transform() -> Vec<Translate> {
        vec![Translate::new(
            Length::SelfPercent(-50.0),
            Length::SelfPercent(-50.0),
        )]
    }

    pub fn is_offscreen_default(&self) -> bool {
        *self == Self::offscreen()
    }

    /// CSS-like rendering of the transform list, handy in logs and tests.
    pub fn transform_css(&self) -> String {
        self.transform
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve to a cell rectangle. `intrinsic` is the panel's natural size,
    /// used on any axis without an explicit size.
    pub fn resolve(&self, viewport: Rect, intrinsic: (u16, u16)) -> FloatRect {
        let own_w = self.width.unwrap_or(intrinsic.0 as i32).max(0);
        let own_h = self.height.unwrap_or(intrinsic.1 as i32).max(0);
        let vw = viewport.width as i32;
        let vh = viewport.height as i32;
        let (mut x, mut y) = match self.anchor {
            Anchor::Center => (
                viewport.x as f64 + vw as f64 / 2.0,
                viewport.y as f64 + vh as f64 / 2.0,
            ),
            Anchor::Origin => (viewport.x as f64, viewport.y as f64),
        };
        for step in &self.transform {
            x += step.x.resolve(vw, own_w);
            y += step.y.resolve(vh, own_h);
        }
        FloatRect {
            x: x.round() as i32,
            y: y.round() as i32,
            width: own_w.min(u16::MAX as i32) as u16,
            height: own_h.min(u16::MAX as i32) as u16,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::offscreen()
    }
}
