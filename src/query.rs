use crate::{
    classify::{RelationResult, VerticalResult},
    config::{validate_scale, RelationConfig},
    error::Result,
    frame::CameraFrame,
    halfspace::RelationKind,
    relate, relate_vertical,
    repository::SceneRepository,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Is `target_id` `kind` of `reference_id`, seen from `camera_id`?
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationQuery {
    pub reference_id: i64,
    pub target_id: i64,
    pub camera_id: i64,
    pub kind: RelationKind,
    pub scale: f64,
}

/// Camera-free above/below query on world axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalQuery {
    pub reference_id: i64,
    pub target_id: i64,
    pub scale: f64,
}

pub fn classify<R>(repo: &R, query: &RelationQuery, config: &RelationConfig) -> Result<RelationResult>
where
    R: SceneRepository + ?Sized,
{
    config.validate()?;
    let scale = validate_scale(query.scale)?.raw();
    let reference = repo.object(query.reference_id)?;
    let target = repo.object(query.target_id)?;
    let camera = repo.camera(query.camera_id)?;
    let frame = CameraFrame::new(camera, reference)?;

    let result = relate(&frame, query.kind, scale, reference, target, config);
    debug!(?query, flag = result.flag, "classified");
    Ok(result)
}

pub fn classify_vertical<R>(
    repo: &R,
    query: &VerticalQuery,
    config: &RelationConfig,
) -> Result<VerticalResult>
where
    R: SceneRepository + ?Sized,
{
    config.validate()?;
    let scale = validate_scale(query.scale)?.raw();
    let reference = repo.object(query.reference_id)?;
    let target = repo.object(query.target_id)?;
    Ok(relate_vertical(scale, reference, target, config))
}

/// All four directional relations for one pair, sharing one frame.
pub fn classify_all_kinds<R>(
    repo: &R,
    reference_id: i64,
    target_id: i64,
    camera_id: i64,
    scale: f64,
    config: &RelationConfig,
) -> Result<Vec<RelationResult>>
where
    R: SceneRepository + ?Sized,
{
    config.validate()?;
    let scale = validate_scale(scale)?.raw();
    let reference = repo.object(reference_id)?;
    let target = repo.object(target_id)?;
    let frame = CameraFrame::new(repo.camera(camera_id)?, reference)?;

    Ok(RelationKind::ALL
        .iter()
        .map(|&kind| relate(&frame, kind, scale, reference, target, config))
        .collect())
}

/// One reference against many targets. The frame is built once and shared
/// across workers; each target yields its own result so a missing target
/// does not abort the others.
pub fn classify_batch<R>(
    repo: &R,
    camera_id: i64,
    reference_id: i64,
    target_ids: &[i64],
    kind: RelationKind,
    scale: f64,
    config: &RelationConfig,
) -> Result<Vec<Result<RelationResult>>>
where
    R: SceneRepository + Sync + ?Sized,
{
    config.validate()?;
    let scale = validate_scale(scale)?.raw();
    let reference = repo.object(reference_id)?;
    let frame = CameraFrame::new(repo.camera(camera_id)?, reference)?;

    let results: Vec<Result<RelationResult>> = target_ids
        .par_iter()
        .map(|&id| {
            let target = repo.object(id)?;
            Ok(relate(&frame, kind, scale, reference, target, config))
        })
        .collect();

    let held = results
        .iter()
        .filter(|r| matches!(r, Ok(result) if result.flag))
        .count();
    info!(
        reference_id,
        %kind,
        targets = target_ids.len(),
        held,
        "batch classified"
    );
    Ok(results)
}

/// Every (reference, target) pair, in parallel. Self-pairs are skipped.
/// Frames differ per reference, so each pair derives its own.
pub fn classify_pairs<R>(
    repo: &R,
    pairs: &[(i64, i64)],
    camera_id: i64,
    kind: RelationKind,
    scale: f64,
    config: &RelationConfig,
) -> Vec<Result<RelationResult>>
where
    R: SceneRepository + Sync + ?Sized,
{
    pairs
        .par_iter()
        .filter(|(reference_id, target_id)| reference_id != target_id)
        .map(|&(reference_id, target_id)| {
            let query = RelationQuery {
                reference_id,
                target_id,
                camera_id,
                kind,
                scale,
            };
            classify(repo, &query, config)
        })
        .collect()
}
