//! Axis-aligned block regions.
//!
//! A [`Region`] is an inclusive integer box. Trigger matching only needs
//! [`Region::contains`]; the remaining geometry exists for tooling such as
//! the outline renderer.

use std::fmt;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Vec3i {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Inclusive axis-aligned box of blocks.
///
/// The corners are stored exactly as given. Configuration feeds range corners
/// through unchanged, so a box whose `min` exceeds `max` on some axis is
/// representable; it simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    min: Vec3i,
    max: Vec3i,
}

impl Region {
    pub const fn new(min: Vec3i, max: Vec3i) -> Self {
        Self { min, max }
    }

    /// Single-block region.
    pub const fn point(at: Vec3i) -> Self {
        Self { min: at, max: at }
    }

    /// Build a region from two arbitrary corners, ordering each axis.
    ///
    /// Selection tools hand out corners in click order, so the admin commands
    /// go through here. Configuration loading does not.
    pub fn from_corners(a: Vec3i, b: Vec3i) -> Self {
        Self {
            min: Vec3i::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3i::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub const fn min(&self) -> Vec3i {
        self.min
    }

    pub const fn max(&self) -> Vec3i {
        self.max
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y && z >= self.min.z && z <= self.max.z
    }

    /// Number of blocks spanned along `axis` (`max - min + 1`).
    pub fn size(&self, axis: Axis) -> i64 {
        let (lo, hi) = match axis {
            Axis::X => (self.min.x, self.max.x),
            Axis::Y => (self.min.y, self.max.y),
            Axis::Z => (self.min.z, self.max.z),
        };
        i64::from(hi) - i64::from(lo) + 1
    }

    /// Number of blocks inside the box. An inverted range has none.
    pub fn volume(&self) -> u128 {
        let blocks = |axis| u128::try_from(self.size(axis).max(0)).unwrap_or_default();
        blocks(Axis::X) * blocks(Axis::Y) * blocks(Axis::Z)
    }

    /// Midpoint of the box, rounded towards negative infinity on each axis.
    pub fn center(&self) -> Vec3i {
        let mid = |lo: i32, hi: i32| {
            let sum = i64::from(lo) + i64::from(hi);
            // the floored mean of two i32 values always fits in i32
            i32::try_from(sum.div_euclid(2)).unwrap_or(lo)
        };
        Vec3i::new(
            mid(self.min.x, self.max.x),
            mid(self.min.y, self.max.y),
            mid(self.min.z, self.max.z),
        )
    }

    /// Lattice points along the twelve edges of the box, for outlining.
    ///
    /// `offset` (in `[0, 1)`) shifts every point along the edge being swept,
    /// so stepping it over successive ticks animates the outline. The
    /// returned iterator is lazy and finite; clone it to walk it again.
    pub fn surface_points(&self, offset: f64) -> SurfacePoints {
        SurfacePoints {
            origin: [
                f64::from(self.min.x),
                f64::from(self.min.y),
                f64::from(self.min.z),
            ],
            size: [
                self.size(Axis::X).max(0),
                self.size(Axis::Y).max(0),
                self.size(Axis::Z).max(0),
            ],
            offset,
            index: 0,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Offset to use for an outline animation on tick `timer`.
///
/// Returns `None` on ticks that fall between `interval` boundaries, otherwise
/// a fraction cycling through `0, 1/scale, 2/scale, ...`.
#[allow(clippy::cast_precision_loss)]
pub fn highlight_offset(timer: u64, interval: u64, scale: u64) -> Option<f64> {
    if interval == 0 || scale == 0 || timer % interval != 0 {
        return None;
    }
    Some(((timer / interval) % scale) as f64 / scale as f64)
}

/// Iterator returned by [`Region::surface_points`].
#[derive(Debug, Clone)]
pub struct SurfacePoints {
    origin: [f64; 3],
    size: [i64; 3],
    offset: f64,
    index: i64,
}

impl SurfacePoints {
    fn total(&self) -> i64 {
        4 * (self.size[0] + self.size[1] + self.size[2])
    }

    #[allow(clippy::cast_precision_loss)]
    fn point_at(&self, index: i64) -> [f64; 3] {
        let [sx, sy, sz] = self.size.map(|s| s as f64);
        let corner = index % 4;
        let mut step = index / 4;
        let pick = |a: f64, b: f64| match corner {
            0 => (0.0, 0.0),
            1 => (0.0, b),
            2 => (a, 0.0),
            _ => (a, b),
        };

        let rel = if step < self.size[1] {
            let (x, z) = pick(sx, sz);
            [x, step as f64 + self.offset, z]
        } else {
            step -= self.size[1];
            if step < self.size[2] {
                let (x, y) = pick(sx, sy);
                [x, y, step as f64 + self.offset]
            } else {
                step -= self.size[2];
                let (y, z) = pick(sy, sz);
                [step as f64 + self.offset, y, z]
            }
        };

        [
            self.origin[0] + rel[0],
            self.origin[1] + rel[1],
            self.origin[2] + rel[2],
        ]
    }
}

impl Iterator for SurfacePoints {
    type Item = [f64; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total() {
            return None;
        }
        let point = self.point_at(self.index);
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total() - self.index).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SurfacePoints {}
impl FusedIterator for SurfacePoints {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Region {
        Region::new(Vec3i::new(0, 10, -4), Vec3i::new(3, 12, -1))
    }

    #[test]
    fn contains_is_inclusive_on_every_axis() {
        let r = cube();
        for x in -2..6 {
            for y in 8..15 {
                for z in -6..2 {
                    let expected = (0..=3).contains(&x) && (10..=12).contains(&y) && (-4..=-1).contains(&z);
                    assert_eq!(r.contains(x, y, z), expected, "({x},{y},{z})");
                }
            }
        }
    }

    #[test]
    fn point_region_has_volume_one() {
        let r = Region::point(Vec3i::new(5, 6, 7));
        assert_eq!(r.min(), r.max());
        assert_eq!(r.volume(), 1);
        assert!(r.contains(5, 6, 7));
        assert!(!r.contains(5, 6, 8));
    }

    #[test]
    fn sizes_and_volume() {
        let r = cube();
        assert_eq!(r.size(Axis::X), 4);
        assert_eq!(r.size(Axis::Y), 3);
        assert_eq!(r.size(Axis::Z), 4);
        assert_eq!(r.volume(), 48);
    }

    #[test]
    fn center_floors_towards_negative_infinity() {
        assert_eq!(cube().center(), Vec3i::new(1, 11, -3));
        let r = Region::new(Vec3i::new(-3, -3, -3), Vec3i::new(0, 0, 0));
        assert_eq!(r.center(), Vec3i::new(-2, -2, -2));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = Region::new(Vec3i::new(5, 0, 0), Vec3i::new(0, 0, 0));
        assert!(!r.contains(3, 0, 0));
        assert_eq!(r.volume(), 0);
        assert_eq!(r.surface_points(0.0).count(), 4 * (0 + 1 + 1));
    }

    #[test]
    fn from_corners_orders_axes() {
        let r = Region::from_corners(Vec3i::new(4, 1, -2), Vec3i::new(0, 9, -8));
        assert_eq!(r.min(), Vec3i::new(0, 1, -8));
        assert_eq!(r.max(), Vec3i::new(4, 9, -2));
    }

    #[test]
    fn surface_points_walk_every_edge() {
        let r = Region::point(Vec3i::new(10, 20, 30));
        let points: Vec<_> = r.surface_points(0.5).collect();
        assert_eq!(points.len(), 12);
        // vertical edges first, swept along y
        assert_eq!(points[0], [10.0, 20.5, 30.0]);
        assert_eq!(points[3], [11.0, 20.5, 31.0]);
        // then along z
        assert_eq!(points[4], [10.0, 20.0, 30.5]);
        // then along x
        assert_eq!(points[11], [10.5, 21.0, 31.0]);
    }

    #[test]
    fn surface_points_are_restartable() {
        let points = cube().surface_points(0.25);
        assert_eq!(points.len(), 4 * (4 + 3 + 4));
        let first: Vec<_> = points.clone().collect();
        let second: Vec<_> = points.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn highlight_offset_cycles_on_interval() {
        assert_eq!(highlight_offset(3, 2, 4), None);
        assert_eq!(highlight_offset(0, 2, 4), Some(0.0));
        assert_eq!(highlight_offset(2, 2, 4), Some(0.25));
        assert_eq!(highlight_offset(8, 2, 4), Some(0.0));
        assert_eq!(highlight_offset(1, 0, 4), None);
    }

    #[test]
    fn display_format() {
        assert_eq!(cube().to_string(), "0,10,-4-3,12,-1");
    }

    #[test]
    fn full_range_volume_does_not_overflow() {
        let r = Region::new(Vec3i::new(i32::MIN, i32::MIN, i32::MIN), Vec3i::new(i32::MAX, i32::MAX, i32::MAX));
        assert_eq!(r.volume(), 1_u128 << 96);
    }
}
