//! Reading and writing store files.
//!
//! A store file is pretty-printed UTF-8 JSON: a mapping from genre name to
//! the list of records of that genre. Writes go to a sibling temporary file
//! first and are renamed into place, so a reader never sees half a store.

use crate::error::{DataLoadError, Result};
use crate::generator::DatasetGenerator;
use crate::types::*;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialize `store` to `path`, replacing any existing file.
///
/// Parent directories are created when missing.
pub fn save_store(store: &Store, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temporary_path(path);
    let written = write_json(store, &tmp_path);
    if let Err(e) = written {
        // best effort; the write error is what gets reported
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path)?;

    debug!("Wrote {} records to {}", store.len(), path.display());
    Ok(())
}

fn write_json(store: &Store, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, store).map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read a store file.
///
/// Returns `FileNotFound` when the path does not exist and `ParseError`
/// when the content is not a valid store.
pub fn load_store(path: &Path) -> Result<Store> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let store: Store =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| DataLoadError::ParseError {
            file: path.display().to_string(),
            line: e.line(),
            reason: e.to_string(),
        })?;

    debug!("Read {} records from {}", store.len(), path.display());
    Ok(store)
}

/// Generate both stores and write them into `out_dir` under their default
/// file names. Returns the written paths (movies first).
pub fn write_dataset(out_dir: &Path, seed: Option<u64>) -> Result<Vec<PathBuf>> {
    let build = |media: MediaType| {
        let generator = DatasetGenerator::new(media);
        let generator = match seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        };
        let path = out_dir.join(generator.media().file_name());
        save_store(&generator.generate(), &path).map(|_| path)
    };

    let (movies, books) = rayon::join(|| build(MediaType::Movie), || build(MediaType::Book));
    let paths = vec![movies?, books?];

    info!(
        "Dataset written: {}",
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(paths)
}
