use crate::geom::{Vec2, Vec3};
use crate::report::DocumentStats;
use serde::{Deserialize, Serialize};

/// A triangle whose corners each use one index for position, normal and texcoord.
///
/// Indices are 1-based and are not range-checked at parse time; see
/// [`Document::is_invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub i1: i32,
    pub i2: i32,
    pub i3: i32,
}

impl Face {
    pub const fn new(i1: i32, i2: i32, i3: i32) -> Self {
        Self { i1, i2, i3 }
    }

    pub fn indices(&self) -> [i32; 3] {
        [self.i1, self.i2, self.i3]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub name: String,
    pub faces: Vec<Face>,
}

impl Geometry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faces: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    pub geometries: Vec<Geometry>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometries: Vec::new(),
        }
    }

    pub fn face_count(&self) -> usize {
        self.geometries.iter().map(|g| g.faces.len()).sum()
    }
}

/// A successfully parsed document.
///
/// Only [`crate::reader::read`] (or explicit construction) produces one, so a
/// failed parse never masquerades as an empty document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub objects: Vec<Object>,
}

impl Document {
    /// True if any corner index of `face` is not a legal reference into all three
    /// attribute tables at once.
    pub fn is_invalid(&self, face: &Face) -> bool {
        face.indices().iter().any(|&i| !self.is_valid_index(i))
    }

    fn is_valid_index(&self, index: i32) -> bool {
        // Negative indices fail the conversion and are rejected with the rest.
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        index >= 1
            && index <= self.positions.len()
            && index <= self.normals.len()
            && index <= self.texcoords.len()
    }

    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.objects.iter().flat_map(|o| o.geometries.iter())
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.geometries().flat_map(|g| g.faces.iter())
    }

    pub fn geometry_count(&self) -> usize {
        self.objects.iter().map(|o| o.geometries.len()).sum()
    }

    pub fn face_count(&self) -> usize {
        self.objects.iter().map(Object::face_count).sum()
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            positions: self.positions.len(),
            normals: self.normals.len(),
            texcoords: self.texcoords.len(),
            objects: self.objects.len(),
            geometries: self.geometry_count(),
            faces: self.face_count(),
            invalid_faces: self.faces().filter(|f| self.is_invalid(f)).count(),
        }
    }
}
