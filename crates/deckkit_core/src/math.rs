//! Geometry types shared by the controller, the layouts and the host.
//!
//! Transforms are plain `#[repr(C)]` values so a host renderer can copy a
//! whole frame into a GPU buffer with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};

/// 2D vector - drag translations and card offsets.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2 {
    /// X component (positive is trailing / right).
    pub x: f32,
    /// Y component (positive is down).
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A rectangle in view coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Per-item visual transform for one rendered frame.
///
/// Hosts apply it in this order: drag offset, scale, stacking offset,
/// rotation, with `z_order` deciding which card is drawn on top.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ItemTransform {
    /// Drag (or shuffle) offset.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation_degrees: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Stacking displacement along the y axis.
    pub vertical_offset: f32,
    /// Draw priority; higher renders above lower.
    pub z_order: f32,
}

impl ItemTransform {
    /// Transform of an item that is not moved, scaled or rotated.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        rotation_degrees: 0.0,
        scale: 1.0,
        vertical_offset: 0.0,
        z_order: 0.0,
    };
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
