use std::path::{Path, PathBuf};

use crate::triphones::{Result, TriphoneError};

pub const DEFAULT_FRAME_CAP: u32 = 20;
/// Upper bound on the frame cap: ten minutes of 10 ms frames per word.
pub const MAX_FRAME_CAP: u32 = 60_000;

/// What a run produces once the trace is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One-hot triphone matrices over the curated roster.
    Vector,
    /// Per-frame triphone counts; `phones` overrides the default roster.
    Count { phones: Option<PathBuf> },
    /// Only list the triphone catalogue.
    Extant,
}

impl Mode {
    pub fn model_name(&self) -> Option<&'static str> {
        match self {
            Mode::Vector => Some("vector"),
            Mode::Count { .. } => Some("count"),
            Mode::Extant => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub input: PathBuf,
    pub words: PathBuf,
    pub output: Option<PathBuf>,
    pub frame_cap: u32,
    pub silent: bool,
    pub mode: Mode,
}

impl ExtractionConfig {
    pub fn new(input: PathBuf, words: PathBuf, mode: Mode) -> Self {
        Self {
            input,
            words,
            output: None,
            frame_cap: DEFAULT_FRAME_CAP,
            silent: false,
            mode,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_frame_cap(mut self, frame_cap: u32) -> Self {
        self.frame_cap = frame_cap;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Checks everything that can be checked before the trace is opened.
    pub fn validate(&self) -> Result<()> {
        require_file(&self.input, "input trace")?;
        require_file(&self.words, "word list")?;
        if self.frame_cap == 0 {
            return Err(TriphoneError::config("frame cap must be at least 1"));
        }
        if self.frame_cap > MAX_FRAME_CAP {
            return Err(TriphoneError::config(format!(
                "frame cap {} exceeds the maximum of {MAX_FRAME_CAP}",
                self.frame_cap
            )));
        }
        if let Mode::Count {
            phones: Some(phones),
        } = &self.mode
        {
            require_file(phones, "phone list")?;
        }
        match (&self.output, self.mode.model_name()) {
            (None, Some(model)) => Err(TriphoneError::config(format!(
                "the {model} model requires an output directory"
            ))),
            (Some(dir), _) if dir.exists() && !dir.is_dir() => Err(TriphoneError::config(
                format!("output path {} is not a directory", dir.display()),
            )),
            _ => Ok(()),
        }
    }
}

fn require_file(path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Err(TriphoneError::config(format!(
            "{label} {} does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(TriphoneError::config(format!(
            "{label} {} is not a file",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_files() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hv.trace");
        let words = dir.path().join("words.txt");
        fs::write(&input, "File: alpha.mfc\n").unwrap();
        fs::write(&words, "alpha\n").unwrap();
        (dir, input, words)
    }

    #[test]
    fn defaults_to_twenty_frames() {
        let config = ExtractionConfig::new("a".into(), "b".into(), Mode::Extant);
        assert_eq!(config.frame_cap, 20);
        assert!(!config.silent);
    }

    #[test]
    fn extant_mode_needs_no_output() {
        let (_dir, input, words) = fixture_files();
        ExtractionConfig::new(input, words, Mode::Extant)
            .validate()
            .unwrap();
    }

    #[test]
    fn models_require_output_directory() {
        let (_dir, input, words) = fixture_files();
        let err = ExtractionConfig::new(input, words, Mode::Vector)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("output directory"));
    }

    #[test]
    fn rejects_missing_input_and_zero_cap() {
        let (dir, input, words) = fixture_files();
        let missing = dir.path().join("missing.trace");
        let err = ExtractionConfig::new(missing, words.clone(), Mode::Extant)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TriphoneError::Config(_)));

        let err = ExtractionConfig::new(input, words, Mode::Extant)
            .with_frame_cap(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("frame cap"));
    }

    #[test]
    fn rejects_frame_cap_above_maximum() {
        let (_dir, input, words) = fixture_files();
        ExtractionConfig::new(input.clone(), words.clone(), Mode::Extant)
            .with_frame_cap(MAX_FRAME_CAP)
            .validate()
            .unwrap();
        let err = ExtractionConfig::new(input, words, Mode::Extant)
            .with_frame_cap(u32::MAX)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn rejects_file_as_output_directory() {
        let (_dir, input, words) = fixture_files();
        let err = ExtractionConfig::new(input.clone(), words, Mode::Vector)
            .with_output(Some(input))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
