use approx::assert_relative_eq;
use nalgebra as na;
use scene_relations::{
    classify, classify_all_kinds, classify_vertical, Box3, Camera, ContainmentMode, InMemoryScene,
    RelationConfig, RelationKind, RelationQuery, VerticalQuery,
};

const REFERENCE: i64 = 1;
const LAMP: i64 = 2;
const FAR_AWAY: i64 = 3;
const SLAB: i64 = 4;
const FLAT: i64 = 5;

const CAMERA: i64 = 1;
const NORTH_CAMERA: i64 = 2;

fn bbox(min: [f64; 3], max: [f64; 3]) -> Box3 {
    Box3::new(min.into(), max.into())
}

fn scene() -> InMemoryScene {
    let mut scene = InMemoryScene::new();
    let objects = [
        (REFERENCE, "cabinet", bbox([0.0, 0.0, 0.0], [2.0, 2.0, 2.0])),
        (LAMP, "lamp", bbox([0.5, 0.5, 2.5], [1.5, 1.5, 3.5])),
        (FAR_AWAY, "crate", bbox([100.0, 100.0, 100.0], [101.0, 101.0, 101.0])),
        (SLAB, "shelf", bbox([-50.0, 0.5, 2.5], [50.0, 1.5, 3.0])),
        (FLAT, "poster", bbox([0.0, 0.0, 1.0], [2.0, 2.0, 1.0])),
    ];
    for (id, name, bbox) in objects {
        scene
            .insert_object(scene_relations::SceneObject {
                id,
                name: name.to_string(),
                bbox,
            })
            .unwrap();
    }
    scene.insert_camera(Camera {
        id: CAMERA,
        position: na::Point3::new(0.0, -10.0, 1.0),
        fov: 60.0,
    })
    .unwrap();
    // Straight south of the reference centroid, so the frame is a pure translation.
    scene.insert_camera(Camera {
        id: NORTH_CAMERA,
        position: na::Point3::new(1.0, -10.0, 1.0),
        fov: 60.0,
    })
    .unwrap();
    scene
}

fn query(kind: RelationKind, target_id: i64, camera_id: i64) -> RelationQuery {
    RelationQuery {
        reference_id: REFERENCE,
        target_id,
        camera_id,
        kind,
        scale: 1.0,
    }
}

#[test]
fn lamp_above_cabinet() {
    let result = classify(
        &scene(),
        &query(RelationKind::Above, LAMP, CAMERA),
        &RelationConfig::default(),
    )
    .unwrap();
    assert!(result.flag);
    assert_relative_eq!(result.primary_boundary, 2.0);
    assert_relative_eq!(result.extent, 2.0);
    assert_relative_eq!(result.threshold, 4.0);
    assert_eq!(result.message, "lamp (2) is above cabinet (1)");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["top_z"], 2.0);
    assert_eq!(json["height"], 2.0);
    assert_eq!(json["above_threshold"], 4.0);
    assert_eq!(json["above_flag"], true);
}

#[test]
fn distant_object_holds_no_relation() {
    let results =
        classify_all_kinds(&scene(), REFERENCE, FAR_AWAY, CAMERA, 1.0, &RelationConfig::default())
            .unwrap();
    assert_eq!(results.len(), 4);
    for result in results {
        assert!(!result.flag, "{} unexpectedly held", result.kind);
        assert!(result.message.contains("is NOT"));
    }
}

#[test]
fn corner_sampling_misses_a_straddling_slab() {
    let scene = scene();
    let q = query(RelationKind::Above, SLAB, NORTH_CAMERA);

    let corners = classify(&scene, &q, &RelationConfig::default()).unwrap();
    assert!(!corners.flag);

    let overlap = RelationConfig {
        containment: ContainmentMode::Overlap,
        ..RelationConfig::default()
    };
    assert!(classify(&scene, &q, &overlap).unwrap().flag);
}

#[test]
fn zero_height_reference_is_legal() {
    let scene = scene();
    let q = RelationQuery {
        reference_id: FLAT,
        target_id: LAMP,
        camera_id: NORTH_CAMERA,
        kind: RelationKind::Above,
        scale: 5.0,
    };
    let result = classify(&scene, &q, &RelationConfig::default()).unwrap();
    assert_relative_eq!(result.extent, 0.0);
    assert_relative_eq!(result.primary_boundary, 1.0);
    assert_relative_eq!(result.threshold, 1.0);
    assert!(!result.flag);
}

#[test]
fn front_and_behind_follow_the_camera() {
    let mut scene = scene();
    scene
        .insert_object(scene_relations::SceneObject {
            id: 10,
            name: "chair".to_string(),
            bbox: bbox([0.5, -2.0, 0.0], [1.5, -1.0, 1.0]),
        })
        .unwrap();
    scene
        .insert_object(scene_relations::SceneObject {
            id: 11,
            name: "plant".to_string(),
            bbox: bbox([0.5, 3.0, 0.0], [1.5, 4.0, 1.0]),
        })
        .unwrap();

    let config = RelationConfig::default();
    let chair_front = classify(&scene, &query(RelationKind::Front, 10, NORTH_CAMERA), &config);
    let plant_behind = classify(&scene, &query(RelationKind::Behind, 11, NORTH_CAMERA), &config);
    let chair_behind = classify(&scene, &query(RelationKind::Behind, 10, NORTH_CAMERA), &config);
    assert!(chair_front.unwrap().flag);
    assert!(plant_behind.unwrap().flag);
    assert!(!chair_behind.unwrap().flag);

    // Seen from the other side, the roles swap.
    scene.insert_camera(Camera {
        id: 3,
        position: na::Point3::new(1.0, 20.0, 1.0),
        fov: 60.0,
    })
    .unwrap();
    let chair_behind = classify(&scene, &query(RelationKind::Behind, 10, 3), &config);
    let plant_front = classify(&scene, &query(RelationKind::Front, 11, 3), &config);
    assert!(chair_behind.unwrap().flag);
    assert!(plant_front.unwrap().flag);
}

#[test]
fn vertical_variant_on_world_axes() {
    let result = classify_vertical(
        &scene(),
        &VerticalQuery {
            reference_id: REFERENCE,
            target_id: LAMP,
            scale: 1.0,
        },
        &RelationConfig::default(),
    )
    .unwrap();
    assert!(result.above_flag);
    assert!(!result.below_flag);
    assert_relative_eq!(result.top_z, 2.0);
    assert_relative_eq!(result.bottom_z, 0.0);
    assert_relative_eq!(result.above_threshold, 4.0);
    assert_relative_eq!(result.below_threshold, -2.0);
    assert_eq!(result.message, "lamp (2) is above cabinet (1)");
}
