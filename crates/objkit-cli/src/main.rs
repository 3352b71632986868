use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use objkit_core::pipeline::{Pipeline, PipelineConfig};
use objkit_core::report::{BatchReport, FileReport, FileStatus};
use objkit_core::Document;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "objkit")]
#[command(about = "Batch clean-up of shared-index OBJ meshes.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clean, rescale and regroup each input, writing `<stem><suffix>.obj` next to it.
    Process {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long, default_value_t = 0.01)]
        scale: f32,
        /// Substring replaced (ignoring case) in geometry names when regrouping.
        #[arg(long, default_value = "branch")]
        replace: String,
        #[arg(long = "with", default_value = "leaf")]
        with: String,
        #[arg(long)]
        no_regroup: bool,
        #[arg(long)]
        keep_invalid_faces: bool,
        #[arg(long)]
        include_normals: bool,
        #[arg(long, default_value = "_modified")]
        suffix: String,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Parse a file and print its statistics.
    Inspect {
        input: PathBuf,
        /// Dump the whole document instead of the statistics.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Process {
            inputs,
            scale,
            replace,
            with,
            no_regroup,
            keep_invalid_faces,
            include_normals,
            suffix,
            output_dir,
            report,
        } => {
            let cfg = PipelineConfig {
                remove_invalid_faces: !keep_invalid_faces,
                scale,
                regroup: !no_regroup,
                rename_from: replace,
                rename_to: with,
                include_normals,
            };
            process(
                &inputs,
                &Pipeline::new(cfg),
                &suffix,
                output_dir.as_deref(),
                report.as_deref(),
            )
        }
        Command::Inspect { input, json } => inspect(&input, json),
    }
}

fn process(
    inputs: &[PathBuf],
    pipeline: &Pipeline,
    suffix: &str,
    output_dir: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let mut batch = BatchReport::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for input in inputs {
        if !has_obj_extension(input) {
            log::warn!("skipping {input:?}: file extension is not OBJ");
            batch.push(FileReport::skipped(input.clone(), "file extension is not OBJ"));
            continue;
        }

        let output = output_path(input, suffix, output_dir);
        if !claimed.insert(output.clone()) {
            let message = format!("output {output:?} is already written by an earlier input");
            log::error!("failed {input:?}: {message}");
            batch.push(FileReport::failed(input.clone(), message));
            continue;
        }
        match process_file(input, &output, pipeline) {
            Ok(file) => {
                log::info!("wrote {output:?}");
                batch.push(file);
            }
            Err(err) => {
                log::error!("failed {input:?}: {err:#}");
                batch.push(FileReport::failed(input.clone(), format!("{err:#}")));
            }
        }
    }

    log::info!(
        "{} converted, {} skipped, {} failed",
        batch.converted,
        batch.skipped,
        batch.failed
    );

    let json = serde_json::to_string_pretty(&batch).context("serialize report")?;
    if let Some(path) = report {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn process_file(input: &Path, output: &Path, pipeline: &Pipeline) -> Result<FileReport> {
    let mut doc = load(input)?;
    let before = doc.stats();
    let stats = pipeline.run(&mut doc);
    let after = doc.stats();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let include_normals = pipeline.config().include_normals;
    write_output(output, |out| objkit_core::write(&doc, out, include_normals))?;

    Ok(FileReport {
        input: input.to_path_buf(),
        status: FileStatus::Converted,
        output: Some(output.to_path_buf()),
        message: None,
        before: Some(before),
        after: Some(after),
        pipeline: Some(stats),
    })
}

/// Creates `output` and fills it with `write`, removing the file again if writing fails.
fn write_output<F>(output: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(output).with_context(|| format!("create output: {output:?}"))?;
    let mut out = BufWriter::new(file);
    if let Err(err) = write(&mut out) {
        drop(out);
        if let Err(remove_err) = std::fs::remove_file(output) {
            log::warn!("could not remove partial output {output:?}: {remove_err}");
        }
        return Err(err).with_context(|| format!("write output: {output:?}"));
    }
    Ok(())
}

fn inspect(input: &Path, json: bool) -> Result<()> {
    let doc = load(input)?;
    let out = if json {
        serde_json::to_string_pretty(&doc).context("serialize document")?
    } else {
        serde_json::to_string_pretty(&doc.stats()).context("serialize stats")?
    };
    println!("{out}");
    Ok(())
}

fn load(input: &Path) -> Result<Document> {
    ensure_input_file(input)?;
    let file = File::open(input).with_context(|| format!("open input: {input:?}"))?;
    objkit_core::read(BufReader::new(file)).with_context(|| format!("read OBJ: {input:?}"))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn has_obj_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"))
}

fn output_path(input: &Path, suffix: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = match input.file_stem() {
        Some(stem) => stem.to_string_lossy(),
        None => {
            log::warn!("{input:?} has no file stem, writing as \"model\"");
            Cow::Borrowed("model")
        }
    };
    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));
    dir.join(format!("{stem}{suffix}.obj"))
}
