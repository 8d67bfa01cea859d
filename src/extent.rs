use crate::{
    frame::CameraFrame,
    types::{Box3, Envelope2D, ZRange},
};
use geo::BoundingRect;

/// Camera-frame XY envelope and world Z range of a reference box.
///
/// Rotation changes which corner is extremal, so the envelope is taken over
/// all eight transformed corners rather than the rotated min/max pair.
pub fn reference_extent(frame: &CameraFrame, bbox: &Box3) -> (Envelope2D, ZRange) {
    let points: Vec<geo::Point<f64>> = frame
        .transform_all(bbox.corners())
        .map(|p| geo::Point::new(p.x, p.y))
        .collect();
    let envelope = geo::MultiPoint::from(points)
        .bounding_rect()
        .map(Envelope2D::from)
        .expect("a box always has eight corners");

    (envelope, bbox.z_range())
}
