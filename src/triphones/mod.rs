pub mod catalogue;
pub mod cli;
pub mod label;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod roster;
pub mod trace;
pub mod words;

use std::path::PathBuf;

use thiserror::Error;

pub use catalogue::{collect_extant, partition_by_center, Catalogue, CataloguePartition};
pub use label::{is_sentinel, PhoneTriplet, SENTINEL_LABELS};
pub use models::count::CountModel;
pub use models::vector::VectorModel;
pub use models::PhoneFeatureSet;
pub use roster::PhoneRoster;
pub use trace::{TraceParser, TraceRecord, WordFrames};

/// Convenient alias for results returned by the triphone modules.
pub type Result<T> = std::result::Result<T, TriphoneError>;

/// Failures raised while reading traces or building features. All of them are fatal.
#[derive(Debug, Error)]
pub enum TriphoneError {
    #[error("malformed trace at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    #[error("trace contains no word boundary lines")]
    NoWordBoundary,

    #[error("word \"{0}\" was requested but does not appear in the trace")]
    UnknownWord(String),

    #[error("triphone label \"{label}\" is not of the form L-C+R: {message}")]
    Structural { label: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize features: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TriphoneError {
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// HVite numbers frames from 1 and frame 1 is constrained to silence, so the
/// feature models read frames `2..=frame_cap`.
pub const FIRST_ACTIVE_FRAME: u32 = 2;

/// Frame indices aggregated by the catalogue builder and both feature models.
pub fn active_frames(frame_cap: u32) -> std::ops::RangeInclusive<u32> {
    FIRST_ACTIVE_FRAME..=frame_cap
}

/// Length of the frame axis of every feature produced for `frame_cap`.
pub fn frame_axis_len(frame_cap: u32) -> usize {
    frame_cap.saturating_sub(1) as usize
}

/// Offset of `frame` on the frame axis.
pub fn frame_offset(frame: u32) -> usize {
    (frame - FIRST_ACTIVE_FRAME) as usize
}
