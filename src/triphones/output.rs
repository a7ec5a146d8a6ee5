use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use ndarray::{Array1, Array2};
use serde_json::Value;
use tracing::{debug, info};

use crate::triphones::catalogue::Catalogue;
use crate::triphones::models::PhoneFeatureSet;
use crate::triphones::{Result, TriphoneError};

/// Conversion of a per-word feature into its JSON payload.
pub trait FeatureArray {
    fn to_json(&self) -> Value;
}

impl FeatureArray for Array1<f64> {
    fn to_json(&self) -> Value {
        Value::from(self.to_vec())
    }
}

impl FeatureArray for Array2<f64> {
    fn to_json(&self) -> Value {
        Value::from(
            self.outer_iter()
                .map(|row| Value::from(row.to_vec()))
                .collect::<Vec<_>>(),
        )
    }
}

/// Writes one `active_triphone_<model>-<phone>.json` artifact per phone.
#[derive(Debug, Clone)]
pub struct FeatureWriter {
    output_dir: PathBuf,
}

impl FeatureWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn artifact_path(&self, model: &str, phone: &str) -> PathBuf {
        self.output_dir
            .join(format!("active_triphone_{model}-{phone}.json"))
    }

    /// Writes every phone of `features` and returns the artifact paths in phone order.
    ///
    /// Artifacts are staged in a scratch directory and moved into place only
    /// once all of them serialized. On failure no artifact of this call is left
    /// in the output directory.
    pub fn write<T: FeatureArray>(
        &self,
        model: &str,
        features: &PhoneFeatureSet<T>,
    ) -> Result<Vec<PathBuf>> {
        info!(
            dir = %self.output_dir.display(),
            model,
            phones = features.len(),
            "saving features"
        );
        fs::create_dir_all(&self.output_dir)
            .map_err(|err| TriphoneError::io(&self.output_dir, err))?;

        let targets: Vec<PathBuf> = features
            .phones()
            .map(|phone| self.artifact_path(model, phone))
            .collect();
        if let Some(path) = targets.iter().find(|path| path.is_dir()) {
            return Err(TriphoneError::io(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "artifact path is a directory"),
            ));
        }

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.output_dir)
            .map_err(|err| TriphoneError::io(&self.output_dir, err))?;
        let mut staged = Vec::with_capacity(targets.len());
        for (phone, words) in features.iter() {
            let path = staging.path().join(format!("{model}-{phone}.json"));
            let payload: BTreeMap<&str, Value> = words
                .iter()
                .map(|(word, feature)| (word.as_str(), feature.to_json()))
                .collect();
            let file = File::create(&path).map_err(|err| TriphoneError::io(&path, err))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &payload)?;
            writer
                .flush()
                .map_err(|err| TriphoneError::io(&path, err))?;
            debug!(phone, path = %path.display(), "staged phone features");
            staged.push(path);
        }

        let mut written = Vec::with_capacity(targets.len());
        for (source, target) in staged.iter().zip(targets) {
            if let Err(err) = fs::rename(source, &target) {
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                return Err(TriphoneError::io(&target, err));
            }
            written.push(target);
        }
        staging
            .close()
            .map_err(|err| TriphoneError::io(&self.output_dir, err))?;
        Ok(written)
    }
}

/// Lists the catalogue, one tab-indented triphone per line.
pub fn report_catalogue<W: Write>(catalogue: &Catalogue, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Extant triphones ({}):", catalogue.len())?;
    for triphone in catalogue.iter() {
        writeln!(out, "\t{triphone}")?;
    }
    out.flush()
}
