use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use voice_detector::fixtures::{write_wav, SyntheticPattern, SyntheticSpec};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice_cli"))
}

fn config_file() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("detector_config.json")
        .to_string_lossy()
        .into_owned()
}

/// Write a synthetic signal to a per-test WAV file under the temp dir
fn wav_fixture(name: &str, spec: SyntheticSpec) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "voice_cli_{}_{}.wav",
        std::process::id(),
        name
    ));
    let signal = spec.to_signal().expect("valid synthetic signal");
    write_wav(&path, &signal).expect("write WAV fixture");
    path
}

#[test]
fn synth_silence_is_ai_generated() {
    let output = cli()
        .args(["--config", &config_file(), "synth", "--pattern", "silence"])
        .output()
        .expect("failed to run voice_cli synth");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("synth report JSON payload");
    assert_eq!(json["pattern"], "silence");
    assert_eq!(json["sample_count"], 16_000);
    assert_eq!(json["report"]["classification"], "AI_GENERATED");
    assert_eq!(json["report"]["ai_score"], 8);
    assert_eq!(json["report"]["confidence_score"], 0.95);
    assert!(json.get("features").is_none());
}

#[test]
fn synth_with_features_includes_feature_set() {
    let output = cli()
        .args(["synth", "--pattern", "sine", "--duration-ms", "500", "--features"])
        .output()
        .expect("failed to run voice_cli synth --features");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("synth JSON payload");
    assert_eq!(json["sample_count"], 8_000);
    assert!(json["features"]["pitch_std"].as_f64().is_some());
    assert!(json["features"]["mfcc_variance"].as_f64().is_some());
}

#[test]
fn classify_wav_succeeds() {
    let wav = wav_fixture("classify", SyntheticSpec::new(SyntheticPattern::Sine));
    let output = cli()
        .args([
            "classify",
            "--wav",
            wav.to_str().unwrap(),
            "--language-code",
            "en",
            "--language-name",
            "English",
            "--expect",
            "AI_GENERATED",
        ])
        .output()
        .expect("failed to run voice_cli classify");
    let _ = std::fs::remove_file(&wav);
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("classification report");
    assert_eq!(json["classification"], "AI_GENERATED");
    assert_eq!(json["language"], "English");
    assert_eq!(json["language_code"], "en");
}

#[test]
fn classify_wav_detects_mismatch() {
    let wav = wav_fixture("mismatch", SyntheticSpec::new(SyntheticPattern::Silence));
    let output = cli()
        .args(["classify", "--wav", wav.to_str().unwrap(), "--expect", "HUMAN"])
        .output()
        .expect("failed to run mismatch classify");
    let _ = std::fs::remove_file(&wav);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(
        stderr.contains("\"failures\""),
        "expected diff JSON in stderr, got {stderr}"
    );
}

#[test]
fn classify_writes_output_file() {
    let wav = wav_fixture("output", SyntheticSpec::new(SyntheticPattern::Silence));
    let report_path = wav.with_extension("json");
    let output = cli()
        .args([
            "classify",
            "--wav",
            wav.to_str().unwrap(),
            "--output",
            report_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run classify --output");
    assert!(output.status.success());

    let written = std::fs::read_to_string(&report_path).expect("report file written");
    let _ = std::fs::remove_file(&wav);
    let _ = std::fs::remove_file(&report_path);
    let json: Value = serde_json::from_str(&written).expect("report JSON");
    assert_eq!(json["language_code"], "unknown");
}

#[test]
fn features_prints_feature_set() {
    let wav = wav_fixture("features", SyntheticSpec::new(SyntheticPattern::WhiteNoise));
    let output = cli()
        .args(["features", "--wav", wav.to_str().unwrap()])
        .output()
        .expect("failed to run voice_cli features");
    let _ = std::fs::remove_file(&wav);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("feature JSON");
    assert!(json["zero_crossing_rate_mean"].as_f64().unwrap_or_default() > 0.3);
}

#[test]
fn batch_emits_one_line_per_file() {
    let first = wav_fixture("batch_a", SyntheticSpec::new(SyntheticPattern::Silence));
    let second = wav_fixture(
        "batch_b",
        SyntheticSpec::new(SyntheticPattern::Vibrato)
            .with_frequency(200.0)
            .with_duration_ms(2_000),
    );
    let output = cli()
        .args(["batch", first.to_str().unwrap(), second.to_str().unwrap()])
        .output()
        .expect("failed to run voice_cli batch");
    let _ = std::fs::remove_file(&first);
    let _ = std::fs::remove_file(&second);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("JSON line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["report"]["classification"], "AI_GENERATED");
    assert_eq!(lines[1]["report"]["classification"], "HUMAN");
}

#[test]
fn missing_wav_exits_with_error() {
    let output = cli()
        .args(["classify", "--wav", "/definitely/not/here.wav"])
        .output()
        .expect("failed to run voice_cli");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(stderr.contains("here.wav"), "unexpected stderr: {stderr}");
}
