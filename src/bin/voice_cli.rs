use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use voice_detector::analysis::batch::classify_batch;
use voice_detector::fixtures::{read_wav, write_wav, SyntheticPattern, SyntheticSpec};
use voice_detector::{
    AppConfig, AudioSignal, Classification, ClassificationReport, ErrorCode, FeatureSet,
    FixedLanguage, LanguageIdentifier, LanguageLabel, UnknownLanguage, VoiceDetector,
};

#[derive(Parser, Debug)]
#[command(
    name = "voice_cli",
    about = "Deterministic synthetic speech detection harness"
)]
struct Cli {
    /// Analysis configuration JSON (defaults to assets/detector_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a WAV file and optionally compare against an expected label
    Classify {
        #[arg(long)]
        wav: PathBuf,
        #[command(flatten)]
        language: LanguageArgs,
        #[arg(long, value_enum)]
        expect: Option<ExpectedClass>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the extracted feature set of a WAV file
    Features {
        #[arg(long)]
        wav: PathBuf,
    },
    /// Classify a generated signal
    Synth {
        #[arg(long, value_enum)]
        pattern: PatternArg,
        #[arg(long, default_value_t = 220.0)]
        frequency_hz: f32,
        #[arg(long, default_value_t = 1_000)]
        duration_ms: u32,
        #[arg(long, default_value_t = 16_000)]
        sample_rate: u32,
        /// Include the extracted feature set in the output
        #[arg(long)]
        features: bool,
        /// Also write the generated signal to a WAV file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Classify several WAV files concurrently, one JSON line per file
    Batch {
        #[arg(required = true)]
        wavs: Vec<PathBuf>,
        #[command(flatten)]
        language: LanguageArgs,
    },
}

#[derive(clap::Args, Debug)]
struct LanguageArgs {
    /// Language code reported for the input
    #[arg(long)]
    language_code: Option<String>,
    /// Language name reported for the input (defaults to the code)
    #[arg(long)]
    language_name: Option<String>,
}

impl LanguageArgs {
    fn identifier(&self) -> Box<dyn LanguageIdentifier> {
        match &self.language_code {
            Some(code) => {
                let name = self.language_name.clone().unwrap_or_else(|| code.clone());
                Box::new(FixedLanguage(LanguageLabel::new(code.clone(), name)))
            }
            None => Box::new(UnknownLanguage),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExpectedClass {
    #[value(name = "AI_GENERATED")]
    AiGenerated,
    #[value(name = "HUMAN")]
    Human,
}

impl From<ExpectedClass> for Classification {
    fn from(value: ExpectedClass) -> Self {
        match value {
            ExpectedClass::AiGenerated => Classification::AiGenerated,
            ExpectedClass::Human => Classification::Human,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PatternArg {
    Silence,
    Sine,
    WhiteNoise,
    Vibrato,
}

impl From<PatternArg> for SyntheticPattern {
    fn from(value: PatternArg) -> Self {
        match value {
            PatternArg::Silence => SyntheticPattern::Silence,
            PatternArg::Sine => SyntheticPattern::Sine,
            PatternArg::WhiteNoise => SyntheticPattern::WhiteNoise,
            PatternArg::Vibrato => SyntheticPattern::Vibrato,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

/// Log to stderr so stdout stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };
    let detector = VoiceDetector::new(config);

    match cli.command {
        Commands::Classify {
            wav,
            language,
            expect,
            output,
        } => run_classify(&detector, &wav, &language, expect, output),
        Commands::Features { wav } => run_features(&detector, &wav),
        Commands::Synth {
            pattern,
            frequency_hz,
            duration_ms,
            sample_rate,
            features,
            save,
        } => {
            let spec = SyntheticSpec::new(pattern.into())
                .with_frequency(frequency_hz)
                .with_duration_ms(duration_ms)
                .with_sample_rate(sample_rate);
            run_synth(&detector, &spec, features, save)
        }
        Commands::Batch { wavs, language } => run_batch(&detector, &wavs, &language),
    }
}

fn load_wav(path: &Path) -> Result<AudioSignal> {
    read_wav(path).with_context(|| format!("loading {}", path.display()))
}

fn run_classify(
    detector: &VoiceDetector,
    wav: &Path,
    language: &LanguageArgs,
    expect: Option<ExpectedClass>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let _span = tracing::info_span!("classify", wav = %wav.display()).entered();
    let signal = load_wav(wav)?;
    let identifier = language.identifier();
    let report = detector
        .classify(&signal, identifier.as_ref())
        .with_context(|| format!("classifying {}", wav.display()))?;

    emit_json(&report, output_path)?;

    match expect.map(Classification::from) {
        Some(expected) if expected != report.classification => {
            emit_diff(wav, expected, &report)?;
            Ok(ExitCode::from(2))
        }
        _ => Ok(ExitCode::from(0)),
    }
}

fn run_features(detector: &VoiceDetector, wav: &Path) -> Result<ExitCode> {
    let _span = tracing::info_span!("features", wav = %wav.display()).entered();
    let signal = load_wav(wav)?;
    let features = detector.extractor().extract(&signal);
    emit_json(&features, None)?;
    Ok(ExitCode::from(0))
}

fn run_synth(
    detector: &VoiceDetector,
    spec: &SyntheticSpec,
    include_features: bool,
    save: Option<PathBuf>,
) -> Result<ExitCode> {
    let _span = tracing::info_span!("synth", pattern = ?spec.pattern).entered();
    let signal = spec
        .to_signal()
        .with_context(|| format!("generating {:?} signal", spec.pattern))?;

    if let Some(path) = &save {
        write_wav(path, &signal).with_context(|| format!("writing {}", path.display()))?;
    }

    let (features, score) = detector
        .analyze(&signal)
        .context("analyzing synthetic signal")?;
    let report = ClassificationReport::new(&score, LanguageLabel::unknown());

    let payload = SynthReportPayload {
        pattern: spec.pattern,
        sample_rate: signal.sample_rate(),
        sample_count: signal.len(),
        report: &report,
        features: include_features.then_some(&features),
    };
    emit_json(&payload, None)?;
    Ok(ExitCode::from(0))
}

fn run_batch(
    detector: &VoiceDetector,
    wavs: &[PathBuf],
    language: &LanguageArgs,
) -> Result<ExitCode> {
    let _span = tracing::info_span!("batch", count = wavs.len()).entered();
    let signals = wavs
        .iter()
        .map(|path| load_wav(path))
        .collect::<Result<Vec<_>>>()?;
    let identifier = language.identifier();

    let mut failed = false;
    for (path, result) in wavs
        .iter()
        .zip(classify_batch(detector, &signals, identifier.as_ref()))
    {
        let line = match result {
            Ok(report) => json!({ "wav": path.display().to_string(), "report": report }),
            Err(err) => {
                failed = true;
                json!({
                    "wav": path.display().to_string(),
                    "error": { "code": err.code(), "message": err.message() },
                })
            }
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(ExitCode::from(if failed { 1 } else { 0 }))
}

fn emit_json<T: Serialize>(value: &T, output_path: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn emit_diff(wav: &Path, expected: Classification, report: &ClassificationReport) -> Result<()> {
    let diff = json!({
        "wav": wav.display().to_string(),
        "failures": [{
            "field": "classification",
            "expected": expected,
            "actual": report.classification,
            "ai_score": report.ai_score,
        }],
    });
    eprintln!("{}", serde_json::to_string_pretty(&diff)?);
    Ok(())
}

#[derive(Serialize)]
struct SynthReportPayload<'a> {
    pattern: SyntheticPattern,
    sample_rate: u32,
    sample_count: usize,
    report: &'a ClassificationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<&'a FeatureSet>,
}
