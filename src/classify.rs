use crate::{
    halfspace::{PrimaryBounds, RelationKind},
    types::SceneObject,
};
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::fmt;

/// Outcome of one directional query: is `target` `kind` of `reference`?
#[derive(Debug, Clone, PartialEq)]
pub struct RelationResult {
    pub kind: RelationKind,
    pub reference_id: i64,
    pub target_id: i64,
    pub primary_boundary: f64,
    pub extent: f64,
    pub threshold: f64,
    pub flag: bool,
    pub message: String,
}

impl RelationResult {
    pub fn new(
        kind: RelationKind,
        reference: &SceneObject,
        target: &SceneObject,
        bounds: PrimaryBounds,
        flag: bool,
    ) -> Self {
        let verb = if flag { "is" } else { "is NOT" };
        let message = format!(
            "{} {verb} {kind} {}",
            Label(target),
            Label(reference)
        );
        Self {
            kind,
            reference_id: reference.id,
            target_id: target.id,
            primary_boundary: bounds.boundary,
            extent: bounds.extent,
            threshold: bounds.threshold,
            flag,
            message,
        }
    }
}

/// Serialized with the field names of its relation kind, e.g. `top_z`,
/// `height`, `above_threshold`, `above_flag` for [`RelationKind::Above`].
impl Serialize for RelationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = &self.kind.spec().fields;
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry("reference_id", &self.reference_id)?;
        map.serialize_entry("target_id", &self.target_id)?;
        map.serialize_entry(fields.boundary, &self.primary_boundary)?;
        map.serialize_entry(fields.extent, &self.extent)?;
        map.serialize_entry(fields.threshold, &self.threshold)?;
        map.serialize_entry(fields.flag, &self.flag)?;
        map.serialize_entry("relation", &self.message)?;
        map.end()
    }
}

/// Outcome of the camera-free vertical query, which tests both directions
/// on world axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalResult {
    pub reference_id: i64,
    pub target_id: i64,
    pub top_z: f64,
    pub bottom_z: f64,
    pub height: f64,
    pub above_threshold: f64,
    pub below_threshold: f64,
    pub above_flag: bool,
    pub below_flag: bool,
    #[serde(rename = "relation")]
    pub message: String,
}

impl VerticalResult {
    pub fn new(
        reference: &SceneObject,
        target: &SceneObject,
        above: PrimaryBounds,
        below: PrimaryBounds,
        above_flag: bool,
        below_flag: bool,
    ) -> Self {
        let relation = match (above_flag, below_flag) {
            (true, true) => "is both above and below",
            (true, false) => "is above",
            (false, true) => "is below",
            (false, false) => "is neither above nor below",
        };
        Self {
            reference_id: reference.id,
            target_id: target.id,
            top_z: above.boundary,
            bottom_z: below.boundary,
            height: above.extent,
            above_threshold: above.threshold,
            below_threshold: below.threshold,
            above_flag,
            below_flag,
            message: format!("{} {relation} {}", Label(target), Label(reference)),
        }
    }
}

struct Label<'a>(&'a SceneObject);

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.id)
    }
}
