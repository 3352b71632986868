use objkit_core::geom::{Vec2, Vec3};
use objkit_core::model::{Document, Face, Geometry, Object};
use objkit_core::transform::{
    flatten_and_regroup, remove_invalid_faces, replace_ignore_case, scale_positions,
};

fn grid_document() -> Document {
    Document {
        positions: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 5.0, 0.5),
        ],
        normals: vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
        texcoords: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ],
        objects: vec![
            Object {
                name: "tree".to_string(),
                geometries: vec![
                    Geometry {
                        name: "Branch_A".to_string(),
                        faces: vec![
                            Face::new(1, 2, 1),
                            Face::new(1, 2, 3),
                            Face::new(2, 1, 2),
                            Face::new(0, 1, 1),
                        ],
                    },
                    Geometry {
                        name: "trunk".to_string(),
                        faces: vec![Face::new(-1, 1, 1), Face::new(2, 2, 2)],
                    },
                ],
            },
            Object {
                name: "crown".to_string(),
                geometries: vec![Geometry {
                    name: "BRANCH_B".to_string(),
                    faces: vec![Face::new(3, 3, 3)],
                }],
            },
        ],
    }
}

#[test]
fn index_must_fit_the_smallest_table() {
    let doc = grid_document();
    // Index 3 exists in positions and texcoords but not in normals.
    assert!(doc.is_invalid(&Face::new(1, 2, 3)));
    assert!(doc.is_invalid(&Face::new(0, 1, 1)));
    assert!(doc.is_invalid(&Face::new(-1, 1, 1)));
    assert!(!doc.is_invalid(&Face::new(2, 1, 2)));
}

#[test]
fn removes_invalid_faces_and_keeps_order() {
    let mut doc = grid_document();
    let removed = remove_invalid_faces(&mut doc);

    assert_eq!(4, removed);
    assert_eq!(
        vec![Face::new(1, 2, 1), Face::new(2, 1, 2)],
        doc.objects[0].geometries[0].faces
    );
    assert_eq!(vec![Face::new(2, 2, 2)], doc.objects[0].geometries[1].faces);
    assert!(doc.faces().all(|f| !doc.is_invalid(f)));

    // Emptied containers stay.
    assert_eq!(2, doc.objects.len());
    assert_eq!(1, doc.objects[1].geometries.len());
    assert!(doc.objects[1].geometries[0].faces.is_empty());
}

#[test]
fn removing_twice_removes_nothing_more() {
    let mut doc = grid_document();
    remove_invalid_faces(&mut doc);
    let snapshot = doc.clone();
    assert_eq!(0, remove_invalid_faces(&mut doc));
    assert_eq!(snapshot, doc);
}

#[test]
fn scales_positions_only() {
    let mut doc = grid_document();
    let normals = doc.normals.clone();
    let texcoords = doc.texcoords.clone();

    scale_positions(&mut doc, 0.01);

    let p = doc.positions[1];
    assert!((p.x - 0.01).abs() < 1e-6);
    assert!((p.y - 0.02).abs() < 1e-6);
    assert!((p.z - 0.03).abs() < 1e-6);
    assert_eq!(normals, doc.normals);
    assert_eq!(texcoords, doc.texcoords);
}

#[test]
fn scaling_composes() {
    let mut twice = grid_document();
    scale_positions(&mut twice, 2.0);
    scale_positions(&mut twice, 0.25);

    let mut once = grid_document();
    scale_positions(&mut once, 0.5);

    for (a, b) in twice.positions.iter().zip(&once.positions) {
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
        assert!((a.z - b.z).abs() < 1e-6);
    }
}

#[test]
fn regroup_creates_one_object_per_geometry() {
    let mut doc = grid_document();
    let faces_before = doc.face_count();
    let geometries_before: Vec<Geometry> = doc.geometries().cloned().collect();

    flatten_and_regroup(&mut doc, |name| format!("obj_{name}"));

    assert_eq!(geometries_before.len(), doc.objects.len());
    assert_eq!(faces_before, doc.face_count());
    for (object, geometry) in doc.objects.iter().zip(&geometries_before) {
        assert_eq!(format!("obj_{}", geometry.name), object.name);
        assert_eq!(vec![geometry.clone()], object.geometries);
    }
}

#[test]
fn regroup_drops_objects_without_geometry() {
    let mut doc = Document {
        objects: vec![Object::new("empty"), Object::new("also empty")],
        ..Document::default()
    };
    flatten_and_regroup(&mut doc, |name| name.to_string());
    assert!(doc.objects.is_empty());
}

#[test]
fn rename_replaces_ignoring_case() {
    assert_eq!("leaf_A", replace_ignore_case("Branch_A", "branch", "leaf"));
    assert_eq!("leaf_leaf", replace_ignore_case("BRANCH_branch", "branch", "leaf"));
    assert_eq!("trunk", replace_ignore_case("trunk", "branch", "leaf"));
    assert_eq!("abc", replace_ignore_case("abc", "", "x"));
    assert_eq!("xa", replace_ignore_case("aaa", "aa", "x"));
}

#[test]
fn rename_folds_non_ascii_letters() {
    assert_eq!("xpfel", replace_ignore_case("Äpfel", "ä", "x"));
    assert_eq!("Zweig_leaf", replace_ignore_case("Zweig_ÄST", "äst", "leaf"));
    assert_eq!("ÉTÉ", replace_ignore_case("ÉTÉ", "ete", "x"));
}

#[test]
fn regroup_with_case_insensitive_rename() {
    let mut doc = grid_document();
    flatten_and_regroup(&mut doc, |name| replace_ignore_case(name, "branch", "leaf"));

    let names: Vec<&str> = doc.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(vec!["leaf_A", "trunk", "leaf_B"], names);
    assert_eq!("Branch_A", doc.objects[0].geometries[0].name);
}
