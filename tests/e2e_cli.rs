//! CLI end-to-end tests
//!
//! Tests for the ffcompose command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the ffcompose binary
#[allow(deprecated)]
fn ffcompose_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ffcompose").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = ffcompose_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = ffcompose_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffcompose"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = ffcompose_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffcompose"));
}

#[test]
fn test_cli_resolve() {
    let mut cmd = ffcompose_cmd();
    cmd.args(["resolve", "/tmp/clip.MP4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Container: MP4"))
        .stdout(predicate::str::contains("Name: clip"));
}

#[test]
fn test_cli_resolve_json() {
    let mut cmd = ffcompose_cmd();
    let output = cmd.args(["resolve", "--json", "/music/track.flac"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["container"], "FLAC");
    assert_eq!(json["name"], "track");
    assert_eq!(json["resources"][0], "audio");
}

#[test]
fn test_cli_resolve_unknown_extension() {
    let mut cmd = ffcompose_cmd();
    cmd.args(["resolve", "/tmp/clip.xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xyz"));
}

#[test]
fn test_cli_containers() {
    let mut cmd = ffcompose_cmd();
    cmd.arg("containers")
        .assert()
        .success()
        .stdout(predicate::str::contains("MP4"))
        .stdout(predicate::str::contains("WEBM"))
        .stdout(predicate::str::contains("SRT"));
}

#[test]
fn test_cli_kinds() {
    let mut cmd = ffcompose_cmd();
    cmd.arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("codec_video"))
        .stdout(predicate::str::contains("-c:v"))
        .stdout(predicate::str::contains("requires a video stream"));
}

#[test]
fn test_cli_presets() {
    let mut cmd = ffcompose_cmd();
    cmd.arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("broadcast_h264"))
        .stdout(predicate::str::contains("concat_input"));
}

#[test]
fn test_cli_build() {
    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--input",
        "/in/talk.mov",
        "--output",
        "/out/talk.mp3",
        "--preset",
        "audio_mp3",
        "--set",
        "sample_rate=44100",
        "--overwrite",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "ffmpeg -y -i /in/talk.mov -vn -c:a libmp3lame -b:a 192k -ar 44100 /out/talk.mp3",
    ));
}

#[test]
fn test_cli_build_json() {
    let mut cmd = ffcompose_cmd();
    let output = cmd
        .args([
            "build",
            "-i",
            "/in/list.txt",
            "-o",
            "/out/joined.mkv",
            "--input-preset",
            "concat_input",
            "--set",
            "codec_video=copy",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["inputs"][0]["container"], "TXT");
    assert_eq!(json["outputs"][0]["container"], "MKV");
    assert_eq!(
        json["tokens"],
        serde_json::json!(["-f", "concat", "-i", "/in/list.txt", "-c:v", "copy", "/out/joined.mkv"])
    );
}

#[test]
fn test_cli_build_rejects_inapplicable_setting() {
    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--input",
        "/in/a.mp4",
        "--output",
        "/out/a.wav",
        "--set",
        "codec_video=libx264",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("-c:v"));
}

#[test]
fn test_cli_build_rejects_preset_on_wrong_side() {
    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--input",
        "/in/list.txt",
        "--output",
        "/out/a.mp4",
        "--preset",
        "concat_input",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--input-preset"));
}

#[test]
fn test_cli_build_with_configured_template() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("ffcompose.toml");

    fs::write(
        &config_file,
        r#"
[[templates]]
name = "proxy"
scope = "output"
settings = [
    { kind = "codec_video", value = "libx264" },
    { kind = "frame_rate", value = 24 },
    { kind = "map", value = "0:v:0" },
]
"#,
    )
    .unwrap();

    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--config",
        config_file.to_str().unwrap(),
        "--input",
        "/in/raw.mov",
        "--output",
        "/out/proxy.mp4",
        "--preset",
        "proxy",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "-c:v libx264 -r 24 -map 0:v:0 /out/proxy.mp4",
    ));
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");

    fs::write(
        &config_file,
        r#"
[paths]
temp_dir = "/tmp"

[[templates]]
name = "mono"
scope = "output"
settings = [{ kind = "audio_channels", value = 1 }]
"#,
    )
    .unwrap();

    let mut cmd = ffcompose_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"))
        .stdout(predicate::str::contains("mono"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");

    fs::write(
        &config_file,
        r#"
[[templates]]
name = "bad"
scope = "any"
"#,
    )
    .unwrap();

    let mut cmd = ffcompose_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn test_cli_build_generates_output_in_output_dir() {
    let temp = tempdir().unwrap();
    let out_dir = temp.path().join("renders");
    let config_file = temp.path().join("ffcompose.toml");
    fs::write(
        &config_file,
        format!("[paths]\noutput_dir = {:?}\n", out_dir.to_str().unwrap()),
    )
    .unwrap();

    let mut cmd = ffcompose_cmd();
    let output = cmd
        .args([
            "build",
            "--config",
            config_file.to_str().unwrap(),
            "--input",
            "/in/raw.mov",
            "--format",
            "mkv",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outputs"][0]["container"], "MKV");
    let path = json["tokens"].as_array().unwrap().last().unwrap().as_str().unwrap();
    assert!(path.starts_with(out_dir.to_str().unwrap()));
    assert!(path.ends_with(".mkv"));
}

#[test]
fn test_cli_build_intermediate_uses_temp_dir() {
    let temp = tempdir().unwrap();
    let scratch = temp.path().join("scratch");
    let config_file = temp.path().join("ffcompose.toml");
    fs::write(
        &config_file,
        format!("[paths]\ntemp_dir = {:?}\n", scratch.to_str().unwrap()),
    )
    .unwrap();

    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--config",
        config_file.to_str().unwrap(),
        "--input",
        "/in/voice.wav",
        "--intermediate",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(scratch.to_str().unwrap()))
    .stdout(predicate::str::contains(".wav"));
}

#[test]
fn test_cli_build_output_conflicts_with_format() {
    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--input",
        "/in/a.mp4",
        "--output",
        "/out/a.mkv",
        "--format",
        "webm",
    ])
    .assert()
    .failure();
}

#[test]
fn test_cli_build_quotes_shell_metacharacters() {
    let mut cmd = ffcompose_cmd();
    cmd.args([
        "build",
        "--input",
        "/in/a.mp4",
        "--output",
        "/out/b.mp4",
        "--set",
        "map=[v]",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("-map '[v]' /out/b.mp4"));
}
