use crate::{
    error::{RelationError, Result},
    types::{Camera, SceneObject},
};
use nalgebra as na;
use tracing::debug;

/// Camera-relative frame aligned on one reference object.
///
/// Points are translated so the camera sits at the origin, then rotated in
/// XY so the camera-to-reference ray points along +Y. Z is never touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Azimuth of the camera-to-reference ray: clockwise from +Y, in radians.
    pub rotation_angle: f64,
    pub origin: na::Point3<f64>,
}

impl CameraFrame {
    /// Derive the frame for a (camera, reference object) pair.
    pub fn new(camera: &Camera, reference: &SceneObject) -> Result<Self> {
        let centroid = reference.bbox.centroid();
        Self::from_points(&camera.position, &centroid).ok_or(RelationError::DegenerateGeometry {
            camera_id: camera.id,
            reference_id: reference.id,
        })
    }

    /// Returns `None` when `target` lies on the vertical line through `origin`,
    /// or when either point is not finite in XY.
    pub fn from_points(origin: &na::Point3<f64>, target: &na::Point3<f64>) -> Option<Self> {
        let dx = target.x - origin.x;
        let dy = target.y - origin.y;
        let planar = dx.hypot(dy);
        if !planar.is_finite() || planar < f64::EPSILON {
            return None;
        }

        let rotation_angle = dx.atan2(dy);
        debug!(
            rotation_angle,
            degrees = rotation_angle.to_degrees(),
            "derived camera frame"
        );
        Some(Self {
            rotation_angle,
            origin: *origin,
        })
    }

    /// Map a world point into this frame.
    pub fn transform(&self, point: &na::Point3<f64>) -> na::Point3<f64> {
        // Azimuth is clockwise, so a counter-clockwise turn by the same angle
        // brings the ray onto +Y.
        let rotation = na::Rotation2::new(self.rotation_angle);
        let planar = rotation * na::Vector2::new(point.x - self.origin.x, point.y - self.origin.y);
        na::Point3::new(planar.x, planar.y, point.z)
    }

    /// Map a point in this frame back to world coordinates.
    pub fn inverse_transform(&self, point: &na::Point3<f64>) -> na::Point3<f64> {
        let rotation = na::Rotation2::new(-self.rotation_angle);
        let planar = rotation * na::Vector2::new(point.x, point.y);
        na::Point3::new(
            planar.x + self.origin.x,
            planar.y + self.origin.y,
            point.z,
        )
    }

    pub fn transform_all<'a>(
        &'a self,
        points: impl IntoIterator<Item = na::Point3<f64>> + 'a,
    ) -> impl Iterator<Item = na::Point3<f64>> + 'a {
        points.into_iter().map(move |p| self.transform(&p))
    }
}
