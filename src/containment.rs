use crate::{frame::CameraFrame, types::{Box3, Prism}};
use itertools::{Itertools, MinMaxResult};
use nalgebra as na;
use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How a target box is tested against a prism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentMode {
    /// True iff at least one of the eight target corners lies inside the prism.
    /// A face crossing the prism with every corner outside tests false.
    #[default]
    Corners,
    /// Per-axis interval overlap between the prism and the envelope of the
    /// transformed target corners.
    Overlap,
}

/// Test a target box against a prism, mapping corners through `frame` first.
///
/// Without a frame the corners are tested in world coordinates.
pub fn target_in_prism(
    frame: Option<&CameraFrame>,
    target: &Box3,
    prism: &Prism,
    mode: ContainmentMode,
) -> bool {
    let corners: Vec<na::Point3<f64>> = match frame {
        Some(frame) => frame.transform_all(target.corners()).collect(),
        None => target.corners().collect(),
    };

    match mode {
        ContainmentMode::Corners => corners.iter().any(|corner| {
            let inside = prism.contains(corner);
            trace!(?corner, inside, "corner test");
            inside
        }),
        ContainmentMode::Overlap => match envelope(&corners) {
            Some((min, max)) => prism.overlaps_envelope(&min, &max),
            None => false,
        },
    }
}

fn envelope(points: &[na::Point3<f64>]) -> Option<(na::Point3<f64>, na::Point3<f64>)> {
    let axis = |f: fn(&na::Point3<f64>) -> f64| match points.iter().map(f).map(r64).minmax() {
        MinMaxResult::MinMax(lo, hi) => Some((lo.raw(), hi.raw())),
        MinMaxResult::OneElement(v) => Some((v.raw(), v.raw())),
        MinMaxResult::NoElements => None,
    };
    let (min_x, max_x) = axis(|p| p.x)?;
    let (min_y, max_y) = axis(|p| p.y)?;
    let (min_z, max_z) = axis(|p| p.z)?;
    Some((
        na::Point3::new(min_x, min_y, min_z),
        na::Point3::new(max_x, max_y, max_z),
    ))
}
