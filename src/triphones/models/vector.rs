use ndarray::Array2;
use tracing::{debug, info};

use crate::triphones::catalogue::CataloguePartition;
use crate::triphones::models::PhoneFeatureSet;
use crate::triphones::roster::PhoneRoster;
use crate::triphones::trace::TraceRecord;
use crate::triphones::{active_frames, frame_axis_len, frame_offset, Result};

/// One-hot model: for each roster phone, a frame × triphone matrix marking
/// which of that phone's catalogue triphones were active.
#[derive(Debug, Clone, Default)]
pub struct VectorModel {
    roster: PhoneRoster,
}

impl VectorModel {
    pub fn new(roster: PhoneRoster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &PhoneRoster {
        &self.roster
    }

    pub fn build<S: AsRef<str>>(
        &self,
        record: &TraceRecord,
        words: &[S],
        partition: &CataloguePartition,
        frame_cap: u32,
    ) -> Result<PhoneFeatureSet<Array2<f64>>> {
        info!(
            roster = self.roster.name(),
            version = self.roster.version(),
            phones = self.roster.len(),
            words = words.len(),
            "applying active triphone vector model"
        );
        let axis = frame_axis_len(frame_cap);
        let mut features = PhoneFeatureSet::allocate(self.roster.phones(), words, |phone| {
            Array2::<f64>::zeros((axis, partition.columns(phone).len()))
        });

        for word in words {
            let word = word.as_ref();
            let frames = record.require_word(word)?;
            debug!(word, "filling triphone vectors");
            for frame in active_frames(frame_cap) {
                let active = frames.active(frame);
                if active.is_empty() {
                    continue;
                }
                let row = frame_offset(frame);
                for phone in self.roster.iter() {
                    let Some(matrix) = features.get_mut(phone, word) else {
                        continue;
                    };
                    for (column, triphone) in partition.columns(phone).iter().enumerate() {
                        if active.contains(triphone) {
                            matrix[[row, column]] = 1.0;
                        }
                    }
                }
            }
        }

        Ok(features)
    }
}
