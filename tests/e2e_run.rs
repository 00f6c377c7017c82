
use std::fs;
use std::path::Path;

use acdc_bench::domain::{AccessToken, CredentialRecord};
use acdc_bench::store::{FileKeyProvider, TokenStore};
use chrono::{Duration, Utc};
use tempfile::tempdir;

use support_run::{run_acdc_bench, spawn_benchmark_server, spawn_http_stub};

/// Caches a valid token the binary will pick up with the same key file.
fn seed_valid_token(dir: &Path) -> Result<(), String> {
    let store = TokenStore::new(Box::new(FileKeyProvider::new(dir.join("user.key"))));
    let record = CredentialRecord::new(
        AccessToken::new("e2e-token".to_owned()),
        Utc::now() + Duration::hours(1),
    );
    store
        .save(&record, &dir.join("token.dat"))
        .map_err(|err| format!("seed token failed: {}", err))
}

fn run_against(dir: &Path, url: String, extra: &[&str]) -> Result<std::process::Output, String> {
    let mut args = vec![
        "tda".to_owned(),
        "simple".to_owned(),
        "10".to_owned(),
        "--endpoint".to_owned(),
        url,
        "--key-path".to_owned(),
        dir.join("user.key").to_string_lossy().into_owned(),
        "--token-path".to_owned(),
        dir.join("token.dat").to_string_lossy().into_owned(),
        "--results".to_owned(),
        dir.join("results.csv").to_string_lossy().into_owned(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));
    run_acdc_bench(dir, args)
}

fn failure(output: &std::process::Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_empty_body_logs_nan() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    seed_valid_token(dir.path())?;
    let (url, _server) = spawn_benchmark_server("")?;

    let output = run_against(dir.path(), url, &[])?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let log = fs::read_to_string(dir.path().join("results.csv"))
        .map_err(|err| format!("read results failed: {}", err))?;
    if log.lines().count() != 1 || !log.ends_with(",TDA_Hosted_DC,Simple,10,NaN\n") {
        return Err(format!("Unexpected results log: {}", log));
    }
    if String::from_utf8_lossy(&output.stdout).trim() != "NaN" {
        return Err(failure(&output));
    }
    Ok(())
}

#[test]
fn e2e_marker_body_logs_value() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    seed_valid_token(dir.path())?;
    let (url, _server) = spawn_benchmark_server("{'batch': 10, 'elapsed': 3.25, 'ok': True}")?;

    let output = run_against(dir.path(), url.clone(), &[])?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let output = run_against(dir.path(), url, &[])?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    let log = fs::read_to_string(dir.path().join("results.csv"))
        .map_err(|err| format!("read results failed: {}", err))?;
    let lines: Vec<&str> = log.lines().collect();
    if lines.len() != 2 || !lines.iter().all(|line| line.ends_with(",10,3.25")) {
        return Err(format!("Unexpected results log: {}", log));
    }
    Ok(())
}

#[test]
fn e2e_malformed_elapsed_policy() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    seed_valid_token(dir.path())?;
    let (url, _server) = spawn_benchmark_server("{'elapsed': 'n/a', 'ok': False}")?;

    let strict = run_against(dir.path(), url.clone(), &[])?;
    if strict.status.success() {
        return Err(format!("Expected failure under the error policy\n{}", failure(&strict)));
    }
    if dir.path().join("results.csv").exists() {
        return Err("No result line expected after a hard failure".to_owned());
    }

    let lenient = run_against(dir.path(), url, &["--malformed-elapsed", "nan"])?;
    if !lenient.status.success() {
        return Err(failure(&lenient));
    }
    let log = fs::read_to_string(dir.path().join("results.csv"))
        .map_err(|err| format!("read results failed: {}", err))?;
    if !log.ends_with(",NaN\n") {
        return Err(format!("Unexpected results log: {}", log));
    }
    Ok(())
}

#[test]
fn e2e_missing_arguments_print_usage_without_side_effects() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_acdc_bench(dir.path(), ["tda", "simple"])?;
    if output.status.success() {
        return Err(format!("Expected usage failure\n{}", failure(&output)));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("Usage") {
        return Err(failure(&output));
    }

    let output = run_acdc_bench(dir.path(), ["tda", "simple", "10", "20"])?;
    if output.status.success() {
        return Err(format!("Expected usage failure\n{}", failure(&output)));
    }

    let entries = fs::read_dir(dir.path())
        .map_err(|err| format!("read_dir failed: {}", err))?
        .count();
    if entries != 0 {
        return Err(format!("Expected no files, found {}", entries));
    }
    Ok(())
}

#[test]
fn e2e_no_arguments_prints_help() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_acdc_bench(dir.path(), Vec::<String>::new())?;
    if !output.status.success() {
        return Err(failure(&output));
    }
    if !String::from_utf8_lossy(&output.stdout).contains("Usage") {
        return Err(failure(&output));
    }
    Ok(())
}

#[test]
fn e2e_authentication_failure_aborts_before_benchmark() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let (identity_base, identity) = spawn_http_stub(
        "400 Bad Request",
        "application/json",
        r#"{"error":"invalid_client","error_description":"unknown application"}"#,
    )?;
    let config = format!("[identity]\nauthority = \"{}/tenant\"\n", identity_base);
    fs::write(dir.path().join("acdc-bench.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;
    let (url, benchmark) = spawn_benchmark_server("{'elapsed': 1.5, 'ok': True}")?;

    let output = run_against(dir.path(), url, &[])?;
    if output.status.success() {
        return Err(format!("Expected a failed run\n{}", failure(&output)));
    }
    if identity.hits() == 0 {
        return Err(format!("Identity endpoint was never asked\n{}", failure(&output)));
    }
    if benchmark.hits() != 0 {
        return Err("Benchmark endpoint must not be called without a token".to_owned());
    }
    if dir.path().join("results.csv").exists() {
        return Err("No result line expected after an authentication failure".to_owned());
    }
    if dir.path().join("token.dat").exists() {
        return Err("Nothing may be cached after an authentication failure".to_owned());
    }
    Ok(())
}
