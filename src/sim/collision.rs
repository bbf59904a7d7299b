//! Box overlap tests
//!
//! All boxes live in the container's frame: origin at the top-left corner,
//! `y` growing downward. Callers convert before testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Full AABB test: the projections overlap on both axes.
///
/// Strict comparisons, so touching edges never overlap. A box with no width
/// or no height never overlaps anything.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    if a.bottom() <= a.top() || b.bottom() <= b.top() {
        return false;
    }
    overlaps_horizontal(a, b) && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Horizontal projections overlap; vertical extent is ignored.
///
/// A box with no width never overlaps anything.
#[inline]
pub fn overlaps_horizontal(a: &Aabb, b: &Aabb) -> bool {
    if a.right() <= a.left() || b.right() <= b.left() {
        return false;
    }
    a.left() < b.right() && a.right() > b.left()
}
