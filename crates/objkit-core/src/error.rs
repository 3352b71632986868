use thiserror::Error;

/// Reasons a read is rejected as a whole.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed number {token:?}")]
    MalformedNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} components, found {found}")]
    MalformedVector {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: face needs 3 corners, found {found}")]
    MalformedFace { line: usize, found: usize },
    #[error("line {line}: corner {token:?} uses distinct position/texcoord/normal indices")]
    UnsupportedMultiIndex { line: usize, token: String },
    #[error("line {line}: face encountered with no open geometry")]
    NoActiveGeometry { line: usize },
    #[error("{}: geometry has no object to belong to", at_line(.line))]
    NoActiveObject { line: Option<usize> },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line that triggered the error, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedNumber { line, .. }
            | ParseError::MalformedVector { line, .. }
            | ParseError::MalformedFace { line, .. }
            | ParseError::UnsupportedMultiIndex { line, .. }
            | ParseError::NoActiveGeometry { line } => Some(*line),
            ParseError::NoActiveObject { line } => *line,
            ParseError::Io(_) => None,
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!("line {line}"),
        None => "end of input".to_string(),
    }
}
