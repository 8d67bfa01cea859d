pub mod classify;
pub mod config;
pub mod containment;
pub mod error;
pub mod extent;
pub mod frame;
pub mod halfspace;
pub mod query;
pub mod repository;
pub mod types;

pub use crate::{
    classify::{RelationResult, VerticalResult},
    config::RelationConfig,
    containment::ContainmentMode,
    error::{RecordKind, RelationError, Result},
    frame::CameraFrame,
    halfspace::RelationKind,
    query::{
        classify, classify_all_kinds, classify_batch, classify_pairs, classify_vertical,
        RelationQuery, VerticalQuery,
    },
    repository::{InMemoryScene, SceneRepository},
    types::{Box3, Camera, Envelope2D, Interval, Prism, SceneObject, ZRange},
};

use crate::{containment::target_in_prism, extent::reference_extent, halfspace::build_prism};

/// Is `target` `kind` of `reference` as seen through `frame`?
///
/// `frame` must have been derived for `reference`; it can be shared across
/// any number of targets. `scale` and `config` are assumed to be validated;
/// the query functions check both.
pub fn relate(
    frame: &CameraFrame,
    kind: RelationKind,
    scale: f64,
    reference: &SceneObject,
    target: &SceneObject,
    config: &RelationConfig,
) -> RelationResult {
    let (envelope, z) = reference_extent(frame, &reference.bbox);
    let (prism, bounds) = build_prism(kind, scale, &envelope, &z, config.lateral_margin);
    let flag = target_in_prism(Some(frame), &target.bbox, &prism, config.containment);
    RelationResult::new(kind, reference, target, bounds, flag)
}

/// Camera-free vertical test on world axes: is `target` above and/or below
/// `reference`?
pub fn relate_vertical(
    scale: f64,
    reference: &SceneObject,
    target: &SceneObject,
    config: &RelationConfig,
) -> VerticalResult {
    let envelope = reference.bbox.world_envelope();
    let z = reference.bbox.z_range();
    let margin = config.lateral_margin;

    let (above, above_bounds) = build_prism(RelationKind::Above, scale, &envelope, &z, margin);
    let (below, below_bounds) = build_prism(RelationKind::Below, scale, &envelope, &z, margin);
    let above_flag = target_in_prism(None, &target.bbox, &above, config.containment);
    let below_flag = target_in_prism(None, &target.bbox, &below, config.containment);

    VerticalResult::new(
        reference,
        target,
        above_bounds,
        below_bounds,
        above_flag,
        below_flag,
    )
}
