use crate::model::Document;
use crate::report::PipelineStats;
use crate::transform::{
    flatten_and_regroup, remove_invalid_faces, replace_ignore_case, scale_positions,
};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub remove_invalid_faces: bool,
    pub scale: f32,
    pub regroup: bool,
    pub rename_from: String,
    pub rename_to: String,
    pub include_normals: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remove_invalid_faces: true,
            // Centimetres to metres.
            scale: 0.01,
            regroup: true,
            rename_from: "branch".to_string(),
            rename_to: "leaf".to_string(),
            include_normals: false,
        }
    }
}

/// Applies the batch clean-up sequence to one document at a time.
pub struct Pipeline {
    cfg: PipelineConfig,
}

impl Pipeline {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn run(&self, doc: &mut Document) -> PipelineStats {
        run(doc, &self.cfg)
    }
}

/// Removes invalid faces, scales positions, then splits every geometry into its
/// own object, each step gated by `cfg`.
pub fn run(doc: &mut Document, cfg: &PipelineConfig) -> PipelineStats {
    let mut stats = PipelineStats {
        objects_before: doc.objects.len(),
        ..PipelineStats::default()
    };

    if cfg.remove_invalid_faces {
        stats.removed_invalid_faces = remove_invalid_faces(doc);
    }

    if cfg.scale != 1.0 {
        scale_positions(doc, cfg.scale);
    }

    if cfg.regroup {
        let (from, to) = (&cfg.rename_from, &cfg.rename_to);
        flatten_and_regroup(doc, |name| replace_ignore_case(name, from, to));
    }

    stats.objects_after = doc.objects.len();
    stats
}
