use crate::{
    error::{RecordKind, RelationError, Result},
    types::{Camera, SceneObject},
};
use serde::Deserialize;
use std::{
    collections::{btree_map::Entry, BTreeMap},
    fs,
    path::Path,
};
use tracing::info;

/// Read-only source of object and camera snapshots.
pub trait SceneRepository {
    fn object(&self, id: i64) -> Result<&SceneObject>;
    fn camera(&self, id: i64) -> Result<&Camera>;
    fn object_ids(&self) -> Vec<i64>;
}

#[derive(Debug, Deserialize)]
struct SceneDocument {
    #[serde(default)]
    objects: Vec<SceneObject>,
    #[serde(default)]
    cameras: Vec<Camera>,
}

/// Scene held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    objects: BTreeMap<i64, SceneObject>,
    cameras: BTreeMap<i64, Camera>,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let doc: SceneDocument = serde_json::from_str(text)?;
        let mut scene = Self::new();
        for object in doc.objects {
            scene.insert_object(object)?;
        }
        for camera in doc.cameras {
            scene.insert_camera(camera)?;
        }
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            objects = scene.objects.len(),
            cameras = scene.cameras.len(),
            "loaded scene"
        );
        Ok(scene)
    }

    /// Rejects boxes with min > max on any axis and ids already present.
    pub fn insert_object(&mut self, object: SceneObject) -> Result<()> {
        if !object.bbox.is_valid() {
            return Err(RelationError::InvalidBox { id: object.id });
        }
        match self.objects.entry(object.id) {
            Entry::Occupied(_) => Err(RelationError::DuplicateId {
                kind: RecordKind::Object,
                id: object.id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(object);
                Ok(())
            }
        }
    }

    /// Rejects non-finite positions and ids already present.
    pub fn insert_camera(&mut self, camera: Camera) -> Result<()> {
        if !camera.position.iter().all(|c| c.is_finite()) {
            return Err(RelationError::InvalidCamera { id: camera.id });
        }
        match self.cameras.entry(camera.id) {
            Entry::Occupied(_) => Err(RelationError::DuplicateId {
                kind: RecordKind::Camera,
                id: camera.id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(camera);
                Ok(())
            }
        }
    }
}

impl SceneRepository for InMemoryScene {
    fn object(&self, id: i64) -> Result<&SceneObject> {
        self.objects.get(&id).ok_or(RelationError::NotFound {
            kind: RecordKind::Object,
            id,
        })
    }

    fn camera(&self, id: i64) -> Result<&Camera> {
        self.cameras.get(&id).ok_or(RelationError::NotFound {
            kind: RecordKind::Camera,
            id,
        })
    }

    fn object_ids(&self) -> Vec<i64> {
        self.objects.keys().copied().collect()
    }
}
