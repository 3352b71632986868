use crate::model::{Document, Face};
use std::io::{self, Write};

/// Serializes `doc` in the order positions, normals, texcoords, objects.
///
/// With `include_normals` off, no `vn` lines are written and face corners carry
/// only the position/texcoord pair (`i/i`); otherwise corners read `i/i/i`.
pub fn write<W: Write>(doc: &Document, out: &mut W, include_normals: bool) -> io::Result<()> {
    for p in &doc.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    if include_normals {
        for n in &doc.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }
    for t in &doc.texcoords {
        writeln!(out, "vt {} {}", t.x, t.y)?;
    }

    for object in &doc.objects {
        writeln!(out, "o {}", object.name)?;
        for geometry in &object.geometries {
            writeln!(out, "g {}", geometry.name)?;
            for face in &geometry.faces {
                write_face(out, face, include_normals)?;
            }
        }
    }
    out.flush()
}

/// Convenience helper returning the serialized document as a string.
pub fn write_string(doc: &Document, include_normals: bool) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(doc, &mut buf, include_normals);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_face<W: Write>(out: &mut W, face: &Face, include_normals: bool) -> io::Result<()> {
    let [a, b, c] = face.indices();
    if include_normals {
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")
    } else {
        writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")
    }
}
