//! Single-pass reader for the shared-index OBJ subset.
//!
//! Recognized directives are `v`, `vn`, `vt`, `o`, `g` and `f`, each followed by
//! one space. Every other line is ignored. Any error rejects the whole input.

use crate::error::ParseError;
use crate::geom::{Vec2, Vec3};
use crate::model::{Document, Face, Geometry, Object};
use log::{debug, warn};
use std::borrow::Cow;
use std::io::BufRead;

pub fn read<R: BufRead>(mut reader: R) -> Result<Document, ParseError> {
    let mut doc = Document::default();
    let mut scopes = OpenScopes::default();

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = decode_line(&buf);
        let Some(directive) = Directive::classify(&line) else {
            continue;
        };

        match directive {
            Directive::Position(rest) => {
                let [x, y, z] = parse_components(rest, line_no)?;
                doc.positions.push(Vec3::new(x, y, z));
            }
            Directive::Normal(rest) => {
                let [x, y, z] = parse_components(rest, line_no)?;
                doc.normals.push(Vec3::new(x, y, z));
            }
            Directive::Texcoord(rest) => {
                let [x, y] = parse_components(rest, line_no)?;
                doc.texcoords.push(Vec2::new(x, y));
            }
            Directive::Object(name) => scopes.open_object(name, &mut doc.objects),
            Directive::Geometry(name) => scopes.open_geometry(name, line_no)?,
            Directive::Face(rest) => {
                let geometry = scopes.current_geometry(line_no)?;
                geometry.faces.push(parse_face(rest, line_no)?);
            }
        }
    }

    scopes.finish(&mut doc.objects)?;

    debug!(
        "parsed {} positions, {} normals, {} texcoords, {} objects, {} faces",
        doc.positions.len(),
        doc.normals.len(),
        doc.texcoords.len(),
        doc.objects.len(),
        doc.face_count()
    );
    Ok(doc)
}

/// Strips the line terminator and decodes lossily.
///
/// Directives and numbers are ASCII; only names can carry bytes that are not
/// UTF-8, and those are replaced rather than failing the read.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

/// Convenience helper to parse an in-memory string.
pub fn read_str(contents: &str) -> Result<Document, ParseError> {
    read(contents.as_bytes())
}

enum Directive<'a> {
    Position(&'a str),
    Normal(&'a str),
    Texcoord(&'a str),
    Object(&'a str),
    Geometry(&'a str),
    Face(&'a str),
}

impl<'a> Directive<'a> {
    fn classify(line: &'a str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix("v ") {
            Some(Directive::Position(rest))
        } else if let Some(rest) = line.strip_prefix("vn ") {
            Some(Directive::Normal(rest))
        } else if let Some(rest) = line.strip_prefix("vt ") {
            Some(Directive::Texcoord(rest))
        } else if let Some(rest) = line.strip_prefix("o ") {
            Some(Directive::Object(rest))
        } else if let Some(rest) = line.strip_prefix("g ") {
            Some(Directive::Geometry(rest))
        } else {
            line.strip_prefix("f ").map(Directive::Face)
        }
    }
}

/// The object and geometry currently accumulating content.
///
/// A geometry opened before any object has nowhere to go yet; it stays open and
/// is adopted by the first object, or rejected at the next `g` or end of input.
#[derive(Debug, Default)]
struct OpenScopes {
    object: Option<Object>,
    geometry: Option<Geometry>,
}

impl OpenScopes {
    fn open_object(&mut self, name: &str, objects: &mut Vec<Object>) {
        if let Some(mut done) = self.object.replace(Object::new(name)) {
            if let Some(geometry) = self.geometry.take() {
                done.geometries.push(geometry);
            }
            objects.push(done);
        }
    }

    fn open_geometry(&mut self, name: &str, line: usize) -> Result<(), ParseError> {
        self.close_geometry(Some(line))?;
        self.geometry = Some(Geometry::new(name));
        Ok(())
    }

    fn current_geometry(&mut self, line: usize) -> Result<&mut Geometry, ParseError> {
        self.geometry
            .as_mut()
            .ok_or(ParseError::NoActiveGeometry { line })
    }

    fn close_geometry(&mut self, line: Option<usize>) -> Result<(), ParseError> {
        let Some(geometry) = self.geometry.take() else {
            return Ok(());
        };
        let object = self
            .object
            .as_mut()
            .ok_or(ParseError::NoActiveObject { line })?;
        object.geometries.push(geometry);
        Ok(())
    }

    fn finish(mut self, objects: &mut Vec<Object>) -> Result<(), ParseError> {
        self.close_geometry(None)?;
        if let Some(done) = self.object.take() {
            objects.push(done);
        }
        Ok(())
    }
}

fn parse_components<const N: usize>(rest: &str, line: usize) -> Result<[f32; N], ParseError> {
    let tokens: Vec<&str> = rest.split_whitespace().take(N).collect();
    if tokens.len() < N {
        return Err(ParseError::MalformedVector {
            line,
            expected: N,
            found: tokens.len(),
        });
    }

    let mut out = [0.0f32; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token.parse::<f32>().map_err(|_| malformed_number(token, line))?;
    }
    Ok(out)
}

fn parse_face(rest: &str, line: usize) -> Result<Face, ParseError> {
    let corners: Vec<&str> = rest.split_whitespace().collect();
    if corners.len() < 3 {
        return Err(ParseError::MalformedFace {
            line,
            found: corners.len(),
        });
    }
    if corners.len() > 3 {
        warn!(
            "line {line}: face has {} corners, only the first 3 are kept",
            corners.len()
        );
    }

    Ok(Face::new(
        parse_corner(corners[0], line)?,
        parse_corner(corners[1], line)?,
        parse_corner(corners[2], line)?,
    ))
}

/// Parses `i`, `i/i`, `i//i` or `i/i/i`; every sub-token must carry the same index.
fn parse_corner(token: &str, line: usize) -> Result<i32, ParseError> {
    let mut parts = token.split('/').filter(|p| !p.is_empty());
    let first = parts.next().ok_or_else(|| malformed_number(token, line))?;
    let index = parse_index(first, line)?;

    for part in parts {
        if parse_index(part, line)? != index {
            return Err(ParseError::UnsupportedMultiIndex {
                line,
                token: token.to_string(),
            });
        }
    }
    Ok(index)
}

fn parse_index(token: &str, line: usize) -> Result<i32, ParseError> {
    token.parse::<i32>().map_err(|_| malformed_number(token, line))
}

fn malformed_number(token: &str, line: usize) -> ParseError {
    ParseError::MalformedNumber {
        line,
        token: token.to_string(),
    }
}
