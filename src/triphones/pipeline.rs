use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::config::{ExtractionConfig, Mode};
use crate::triphones::catalogue::{collect_extant, partition_by_center};
use crate::triphones::models::count::CountModel;
use crate::triphones::models::vector::VectorModel;
use crate::triphones::output::{report_catalogue, FeatureWriter};
use crate::triphones::roster::PhoneRoster;
use crate::triphones::trace::TraceParser;
use crate::triphones::words::load_word_list;
use crate::triphones::{Result, TriphoneError};

/// What a completed run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub words: usize,
    pub catalogue_size: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Runs one extraction: word list, trace, catalogue, then the configured model.
///
/// `config` is expected to have passed [`ExtractionConfig::validate`]. Nothing
/// is written until every feature of the run has been built, and a failed
/// write leaves no artifacts behind.
pub fn run<W: Write>(config: &ExtractionConfig, out: &mut W) -> Result<RunSummary> {
    let words = load_word_list(&config.words)?;
    let record = TraceParser::new(config.frame_cap).parse_file(&config.input)?;
    let catalogue = collect_extant(&record, &words, config.frame_cap)?;

    let mut summary = RunSummary {
        words: words.len(),
        catalogue_size: catalogue.len(),
        artifacts: Vec::new(),
    };

    match &config.mode {
        Mode::Extant => {
            report_catalogue(&catalogue, out).map_err(|err| TriphoneError::io("<stdout>", err))?;
        }
        Mode::Vector => {
            let model = VectorModel::default();
            let partition = partition_by_center(&catalogue, model.roster().phones())?;
            let features = model.build(&record, &words, &partition, config.frame_cap)?;
            summary.artifacts = writer(config)?.write("vector", &features)?;
        }
        Mode::Count { phones } => {
            let roster = match phones {
                Some(path) => PhoneRoster::load(path)?,
                None => PhoneRoster::sufficient_data(),
            };
            let features = CountModel::new(roster).build(&record, &words, config.frame_cap)?;
            summary.artifacts = writer(config)?.write("count", &features)?;
        }
    }

    info!(
        words = summary.words,
        triphones = summary.catalogue_size,
        artifacts = summary.artifacts.len(),
        "extraction finished"
    );
    Ok(summary)
}

fn writer(config: &ExtractionConfig) -> Result<FeatureWriter> {
    config
        .output
        .as_ref()
        .map(FeatureWriter::new)
        .ok_or_else(|| TriphoneError::config("an output directory is required"))
}
