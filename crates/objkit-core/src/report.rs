use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentStats {
    pub positions: usize,
    pub normals: usize,
    pub texcoords: usize,
    pub objects: usize,
    pub geometries: usize,
    pub faces: usize,
    pub invalid_faces: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    pub removed_invalid_faces: usize,
    pub objects_before: usize,
    pub objects_after: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Converted,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub status: FileStatus,
    pub output: Option<PathBuf>,
    pub message: Option<String>,
    pub before: Option<DocumentStats>,
    pub after: Option<DocumentStats>,
    pub pipeline: Option<PipelineStats>,
}

impl FileReport {
    pub fn skipped(input: PathBuf, message: impl Into<String>) -> Self {
        Self {
            input,
            status: FileStatus::Skipped,
            output: None,
            message: Some(message.into()),
            before: None,
            after: None,
            pipeline: None,
        }
    }

    pub fn failed(input: PathBuf, message: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Failed,
            ..Self::skipped(input, message)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, file: FileReport) {
        match file.status {
            FileStatus::Converted => self.converted += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(file);
    }
}
