//! Parser for `HVite` trace output.
//!
//! Two line shapes matter, everything else is ignored:
//!
//! ```text
//! File: /data/words/alpha.mfc
//! Activated phone models for frame 2 (5) : sil-b+ih sil-b+ih ih-s+sil
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::triphones::{Result, TriphoneError};

static WORD_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^File: (?P<wordpath>.+)\.mfc$").expect("valid word path pattern"));

static ACTIVE_FRAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Activated phone models for frame (?P<frameid>[0-9]+) \([0-9]+\) : (?P<triphonelist>.+)$",
    )
    .expect("valid active frame pattern")
});

/// Active triphones of one word, keyed by the 1-based HVite frame index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrames {
    frames: BTreeMap<u32, BTreeSet<String>>,
}

impl WordFrames {
    pub fn frame(&self, index: u32) -> Option<&BTreeSet<String>> {
        self.frames.get(&index)
    }

    /// Like [`WordFrames::frame`] but treats a frame the trace never reported as empty.
    pub fn active(&self, index: u32) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.frames.get(&index).unwrap_or(&EMPTY)
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Parsed trace: word → frame → set of active triphone labels.
///
/// Only [`TraceParser`] builds records; consumers read them through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceRecord {
    words: BTreeMap<String, WordFrames>,
}

impl TraceRecord {
    pub fn word(&self, name: &str) -> Option<&WordFrames> {
        self.words.get(name)
    }

    /// Looks up the word first, then the frame.
    pub fn frame(&self, word: &str, index: u32) -> Option<&BTreeSet<String>> {
        self.word(word).and_then(|frames| frames.frame(index))
    }

    /// Same as [`TraceRecord::word`] but a missing word is an error.
    pub fn require_word(&self, name: &str) -> Result<&WordFrames> {
        self.word(name)
            .ok_or_else(|| TriphoneError::UnknownWord(name.to_string()))
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, &WordFrames)> {
        self.words.iter().map(|(name, frames)| (name.as_str(), frames))
    }

    pub fn word_names(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Streams a trace into a [`TraceRecord`], dropping frames past `frame_cap`.
#[derive(Debug, Clone, Copy)]
pub struct TraceParser {
    frame_cap: u32,
}

impl TraceParser {
    pub fn new(frame_cap: u32) -> Self {
        Self { frame_cap }
    }

    pub fn parse_file(&self, path: &Path) -> Result<TraceRecord> {
        info!(source = %path.display(), frame_cap = self.frame_cap, "reading triphone lists");
        let file = File::open(path).map_err(|err| TriphoneError::io(path, err))?;
        self.parse(BufReader::new(file)).map_err(|err| match err {
            TriphoneError::Io { source, .. } => TriphoneError::io(path, source),
            other => other,
        })
    }

    pub fn parse<R: BufRead>(&self, reader: R) -> Result<TraceRecord> {
        let mut state = ParseState::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|err| TriphoneError::io("<trace>", err))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if let Some(captures) = WORD_PATH_RE.captures(line) {
                state.begin_word(word_name(&captures["wordpath"]));
            } else if let Some(captures) = ACTIVE_FRAME_RE.captures(line) {
                let raw_frame = &captures["frameid"];
                let frame: u32 = raw_frame.parse().map_err(|_| {
                    TriphoneError::malformed(
                        line_number,
                        format!("frame index {raw_frame} is out of range"),
                    )
                })?;
                // HVite frames are 1-indexed, so the cap itself is kept.
                if frame > self.frame_cap {
                    state.discarded += 1;
                    continue;
                }
                let triphones: BTreeSet<String> = captures["triphonelist"]
                    .split(' ')
                    .map(str::to_string)
                    .collect();
                state.record_frame(line_number, frame, triphones)?;
            }
        }

        state.finish()
    }
}

#[derive(Default)]
struct ParseState {
    record: TraceRecord,
    current: Option<(String, WordFrames)>,
    kept: usize,
    discarded: usize,
}

impl ParseState {
    fn begin_word(&mut self, name: String) {
        self.commit();
        self.current = Some((name, WordFrames::default()));
    }

    fn record_frame(
        &mut self,
        line_number: usize,
        frame: u32,
        triphones: BTreeSet<String>,
    ) -> Result<()> {
        let (_, frames) = self.current.as_mut().ok_or_else(|| {
            TriphoneError::malformed(
                line_number,
                "frame activation line appears before any word boundary",
            )
        })?;
        frames.frames.insert(frame, triphones);
        self.kept += 1;
        Ok(())
    }

    fn commit(&mut self) {
        if let Some((name, frames)) = self.current.take() {
            debug!(word = %name, frames = frames.len(), "collected triphone lists");
            if self.record.words.insert(name.clone(), frames).is_some() {
                warn!(word = %name, "word appears more than once; keeping the later block");
            }
        }
    }

    fn finish(mut self) -> Result<TraceRecord> {
        if self.current.is_none() && self.record.is_empty() {
            return Err(TriphoneError::NoWordBoundary);
        }
        self.commit();
        info!(
            words = self.record.len(),
            frames_kept = self.kept,
            frames_discarded = self.discarded,
            "finished reading triphone lists"
        );
        Ok(self.record)
    }
}

/// `/data/words/alpha.v1` → `alpha`: last path segment, cut at its first dot.
fn word_name(word_path: &str) -> String {
    let file = word_path.rsplit('/').next().unwrap_or(word_path);
    file.split('.').next().unwrap_or(file).to_string()
}
