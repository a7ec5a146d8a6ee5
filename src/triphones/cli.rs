use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ExtractionConfig, Mode, DEFAULT_FRAME_CAP};

#[derive(Parser, Debug)]
#[command(
    name = "active-triphones",
    version,
    about = "Per-phone active-triphone features from HVite alignment traces"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one-hot triphone matrices for the curated phone roster.
    Vector(ModelArgs),
    /// Build per-frame counts of active triphones for each phone.
    Count(CountArgs),
    /// List every triphone observed for the word list.
    Extant(TraceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// HVite trace file (e.g. hv.trace).
    #[arg(long)]
    pub input: PathBuf,
    /// Word list, one word per line.
    #[arg(long)]
    pub words: PathBuf,
    /// Last 1-based frame read from each word.
    #[arg(long = "frames", default_value_t = DEFAULT_FRAME_CAP)]
    pub frame_cap: u32,
    /// Suppress progress reporting.
    #[arg(short = 'S', long)]
    pub silent: bool,
    /// Append log output to this file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    #[command(flatten)]
    pub trace: TraceArgs,
    /// Directory receiving one feature file per phone.
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Phone list, one per line; defaults to the curated roster.
    #[arg(long, value_name = "FILE")]
    pub phones: Option<PathBuf>,
}

impl Command {
    pub fn trace_args(&self) -> &TraceArgs {
        match self {
            Command::Vector(args) => &args.trace,
            Command::Count(args) => &args.model.trace,
            Command::Extant(args) => args,
        }
    }

    pub fn to_config(&self) -> ExtractionConfig {
        let (mode, output) = match self {
            Command::Vector(args) => (Mode::Vector, Some(args.output.clone())),
            Command::Count(args) => (
                Mode::Count {
                    phones: args.phones.clone(),
                },
                Some(args.model.output.clone()),
            ),
            Command::Extant(_) => (Mode::Extant, None),
        };
        let trace = self.trace_args();
        ExtractionConfig::new(trace.input.clone(), trace.words.clone(), mode)
            .with_output(output)
            .with_frame_cap(trace.frame_cap)
            .with_silent(trace.silent)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::config::Mode;
    use clap::Parser;

    #[test]
    fn vector_defaults_to_twenty_frames() {
        let cli = Cli::try_parse_from([
            "active-triphones",
            "vector",
            "--input",
            "hv.trace",
            "--words",
            "words.txt",
            "--output",
            "out",
        ])
        .unwrap();
        let config = cli.command.to_config();
        assert_eq!(config.frame_cap, 20);
        assert_eq!(config.mode, Mode::Vector);
        assert!(!config.silent);
        assert_eq!(config.output.as_deref(), Some(std::path::Path::new("out")));
    }

    #[test]
    fn count_accepts_phone_list_and_silent_switch() {
        let cli = Cli::try_parse_from([
            "active-triphones",
            "count",
            "--input",
            "hv.trace",
            "--words",
            "words.txt",
            "--output",
            "out",
            "--phones",
            "phones.txt",
            "--frames",
            "12",
            "-S",
        ])
        .unwrap();
        let config = cli.command.to_config();
        assert_eq!(config.frame_cap, 12);
        assert!(config.silent);
        assert!(matches!(config.mode, Mode::Count { phones: Some(_) }));
    }

    #[test]
    fn extant_needs_no_output() {
        let cli = Cli::try_parse_from([
            "active-triphones",
            "extant",
            "--input",
            "hv.trace",
            "--words",
            "words.txt",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Extant(_)));
        assert!(cli.command.to_config().output.is_none());
    }

    #[test]
    fn vector_requires_input() {
        let result = Cli::try_parse_from([
            "active-triphones",
            "vector",
            "--words",
            "words.txt",
            "--output",
            "out",
        ]);
        assert!(result.is_err());
    }
}
