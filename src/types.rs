use itertools::iproduct;
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in the shared world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    pub min: na::Point3<f64>,
    pub max: na::Point3<f64>,
}

impl Box3 {
    pub fn new(min: na::Point3<f64>, max: na::Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn centroid(&self) -> na::Point3<f64> {
        na::center(&self.min, &self.max)
    }

    /// The eight corners, every combination of {min, max} per axis.
    pub fn corners(&self) -> impl Iterator<Item = na::Point3<f64>> {
        let xs = [self.min.x, self.max.x];
        let ys = [self.min.y, self.max.y];
        let zs = [self.min.z, self.max.z];
        iproduct!(xs, ys, zs).map(|(x, y, z)| na::Point3::new(x, y, z))
    }

    pub fn z_range(&self) -> ZRange {
        ZRange {
            min_z: self.min.z,
            max_z: self.max.z,
        }
    }

    /// World-axis XY envelope, used where no camera frame is involved.
    pub fn world_envelope(&self) -> Envelope2D {
        Envelope2D {
            min_x: self.min.x,
            max_x: self.max.x,
            min_y: self.min.y,
            max_y: self.max.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: i64,
    pub name: String,
    pub bbox: Box3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i64,
    pub position: na::Point3<f64>,
    #[serde(default)]
    pub fov: f64,
}

/// XY bounds of a point set in the camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope2D {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl From<geo::Rect<f64>> for Envelope2D {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZRange {
    pub min_z: f64,
    pub max_z: f64,
}

/// Closed interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    pub fn widen(&self, margin: f64) -> Self {
        Self::new(self.lo - margin, self.hi + margin)
    }
}

/// Axis-aligned region standing for a directional half-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Prism {
    pub fn contains(&self, p: &na::Point3<f64>) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Per-axis overlap with the axis-aligned envelope `[min, max]`.
    pub fn overlaps_envelope(&self, min: &na::Point3<f64>, max: &na::Point3<f64>) -> bool {
        self.x.overlaps(&Interval::new(min.x, max.x))
            && self.y.overlaps(&Interval::new(min.y, max.y))
            && self.z.overlaps(&Interval::new(min.z, max.z))
    }

    /// True when the two prisms share a region of positive volume.
    pub fn overlaps_with_volume(&self, other: &Prism) -> bool {
        fn open_overlap(a: &Interval, b: &Interval) -> bool {
            a.lo.max(b.lo) < a.hi.min(b.hi)
        }
        open_overlap(&self.x, &other.x)
            && open_overlap(&self.y, &other.y)
            && open_overlap(&self.z, &other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_cover_all_combinations() {
        let b = Box3::new(na::Point3::new(0.0, 1.0, 2.0), na::Point3::new(3.0, 4.0, 5.0));
        let corners: Vec<_> = b.corners().collect();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&na::Point3::new(0.0, 4.0, 2.0)));
        assert!(corners.contains(&na::Point3::new(3.0, 1.0, 5.0)));
    }

    #[test]
    fn interval_is_closed() {
        let i = Interval::new(1.0, 1.0);
        assert!(i.contains(1.0));
        assert!(!i.contains(1.0 + 1e-12));
        assert!(i.overlaps(&Interval::new(0.0, 1.0)));
    }

    #[test]
    fn inverted_box_is_invalid() {
        let b = Box3::new(na::Point3::new(0.0, 0.0, 1.0), na::Point3::new(1.0, 1.0, 0.0));
        assert!(!b.is_valid());
    }
}
