use crate::model::{Document, Geometry, Object};
use log::debug;

/// Drops every face that fails [`Document::is_invalid`], keeping the order of the rest.
///
/// Empty geometries and objects are left in place. Returns the number of faces removed.
pub fn remove_invalid_faces(doc: &mut Document) -> usize {
    let mut objects = std::mem::take(&mut doc.objects);

    let mut removed = 0;
    for object in &mut objects {
        for geometry in &mut object.geometries {
            let before = geometry.faces.len();
            geometry.faces.retain(|f| !doc.is_invalid(f));
            removed += before - geometry.faces.len();
        }
    }
    doc.objects = objects;

    debug!("removed {removed} invalid faces");
    removed
}

/// Multiplies every position component by `factor`. Normals and texcoords are untouched.
pub fn scale_positions(doc: &mut Document, factor: f32) {
    for p in &mut doc.positions {
        *p = p.scaled(factor);
    }
}

/// Replaces the object tree with one single-geometry object per geometry.
///
/// Geometries are visited object-major; each new object is named
/// `rename(&geometry.name)` and holds the geometry unchanged.
pub fn flatten_and_regroup<F>(doc: &mut Document, mut rename: F)
where
    F: FnMut(&str) -> String,
{
    let geometries: Vec<Geometry> = std::mem::take(&mut doc.objects)
        .into_iter()
        .flat_map(|o| o.geometries)
        .collect();

    doc.objects = geometries
        .into_iter()
        .map(|g| Object {
            name: rename(&g.name),
            geometries: vec![g],
        })
        .collect();

    debug!("regrouped into {} objects", doc.objects.len());
}

/// Replaces every case-insensitive occurrence of `from` in `haystack` with `to`.
///
/// Characters are compared by their lowercase mappings. Matches never overlap and
/// are found left to right. An empty `from` leaves the input unchanged.
pub fn replace_ignore_case(haystack: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while !rest.is_empty() {
        if let Some(len) = match_prefix_ignore_case(rest, from) {
            out.push_str(to);
            rest = &rest[len..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Byte length of the prefix of `text` matching `needle`, if any.
fn match_prefix_ignore_case(text: &str, needle: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for n in needle.chars() {
        let (_, t) = text_chars.next()?;
        if !t.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(i, _)| i))
}
