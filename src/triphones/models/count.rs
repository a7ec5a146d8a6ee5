use ndarray::Array1;
use tracing::info;

use crate::triphones::label::{is_sentinel, PhoneTriplet};
use crate::triphones::models::PhoneFeatureSet;
use crate::triphones::roster::PhoneRoster;
use crate::triphones::trace::TraceRecord;
use crate::triphones::{active_frames, frame_axis_len, frame_offset, Result};

/// Counts, per frame, the active triphones centred on each roster phone.
#[derive(Debug, Clone, Default)]
pub struct CountModel {
    roster: PhoneRoster,
}

impl CountModel {
    pub fn new(roster: PhoneRoster) -> Self {
        Self { roster }
    }

    /// Builds a `frame_cap - 1` count vector for every (phone, word) pair.
    ///
    /// Triphones centred on phones outside the roster are ignored; a label that
    /// is not `L-C+R` aborts the build.
    pub fn build<S: AsRef<str>>(
        &self,
        record: &TraceRecord,
        words: &[S],
        frame_cap: u32,
    ) -> Result<PhoneFeatureSet<Array1<f64>>> {
        info!(
            roster = self.roster.name(),
            phones = self.roster.len(),
            words = words.len(),
            "applying active triphone count model"
        );
        let axis = frame_axis_len(frame_cap);
        let mut features = PhoneFeatureSet::allocate(self.roster.phones(), words, |_| {
            Array1::<f64>::zeros(axis)
        });

        for word in words {
            let word = word.as_ref();
            let frames = record.require_word(word)?;
            for frame in active_frames(frame_cap) {
                for label in frames.active(frame) {
                    if is_sentinel(label) {
                        continue;
                    }
                    let triplet = PhoneTriplet::parse(label)?;
                    if let Some(counts) = features.get_mut(triplet.center, word) {
                        counts[frame_offset(frame)] += 1.0;
                    }
                }
            }
        }

        Ok(features)
    }
}
