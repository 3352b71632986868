pub mod error;
pub mod geom;
pub mod model;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod transform;
pub mod writer;

pub use error::ParseError;
pub use model::{Document, Face, Geometry, Object};
pub use reader::read;
pub use writer::write;
