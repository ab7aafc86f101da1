//! End-to-end orchestration tests
//!
//! Exercise the full path: backend dispatch, artifact resolution from a
//! fake downloads directory, canonical writes, and summary reporting.

use mediagen_core::interactive::InteractiveAgentBackend;
use mediagen_core::synthesis::DirectSynthesisBackend;
use mediagen_core::{ArtifactResolver, JobSpec, Orchestrator, ResultReporter};
use mediagen_test_utils::{CloseCounter, ScriptedAgent, ScriptedSynthesizer};
use std::fs;
use tempfile::TempDir;

fn bgm_job(assets: &TempDir) -> JobSpec {
    JobSpec::interactive(
        "bgm",
        "generate a chiptune track on the music site",
        "mp3",
        assets.path().join("bgm.mp3"),
    )
}

fn voice_job(assets: &TempDir, id: &str, text: &str) -> JobSpec {
    JobSpec::synthesis(
        id,
        text,
        "voice-1",
        "model-1",
        "mp3_44100_128",
        assets.path().join(format!("{id}.mp3")),
    )
}

#[tokio::test]
async fn interactive_job_resolves_downloaded_artifact() {
    let assets = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    fs::write(downloads.path().join("Suno - track.mp3"), b"bgm-bytes").unwrap();

    let counter = CloseCounter::default();
    let agent = ScriptedAgent::succeeding("BGM generation completed", counter.clone());
    let orchestrator = Orchestrator::new(assets.path(), ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(InteractiveAgentBackend::new(agent)));

    let outcomes = orchestrator.execute_all(&[bgm_job(&assets)]).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].succeeded);
    assert_eq!(outcomes[0].resolved_bytes_size, Some(9));
    assert_eq!(
        fs::read(assets.path().join("bgm.mp3")).unwrap(),
        b"bgm-bytes"
    );
    // The download itself stays where the browser put it.
    assert!(downloads.path().join("Suno - track.mp3").exists());
    assert_eq!(counter.closes(), 1);
}

#[tokio::test]
async fn missing_download_yields_fallback_guidance_naming_the_canonical_path() {
    let assets = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let counter = CloseCounter::default();
    let agent = ScriptedAgent::succeeding("done, honest", counter.clone());
    let orchestrator = Orchestrator::new(assets.path(), ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(InteractiveAgentBackend::new(agent)));

    let outcomes = orchestrator.execute_all(&[bgm_job(&assets)]).await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].succeeded);
    let message = outcomes[0].error_message.as_deref().unwrap();
    assert!(message.contains("place the file manually at"));
    assert!(message.contains(&assets.path().join("bgm.mp3").display().to_string()));
    assert_eq!(counter.closes(), 1);
}

#[tokio::test]
async fn agent_failure_still_closes_session_and_run_continues() {
    let assets = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();

    let counter = CloseCounter::default();
    let agent = ScriptedAgent::failing("captcha wall", counter.clone());
    let synth = ScriptedSynthesizer::new().with_chunks("Ready, Go!", vec![b"audio".to_vec()]);

    let orchestrator = Orchestrator::new(assets.path(), ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(InteractiveAgentBackend::new(agent)))
        .with_backend(Box::new(DirectSynthesisBackend::new(synth)));

    let jobs = vec![bgm_job(&assets), voice_job(&assets, "start", "Ready, Go!")];
    let outcomes = orchestrator.execute_all(&jobs).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].succeeded);
    let message = outcomes[0].error_message.as_deref().unwrap();
    assert!(message.contains("captcha wall"));
    // Agent failures carry the placement instruction too, not just
    // missing-download ones.
    assert!(message.contains(&assets.path().join("bgm.mp3").display().to_string()));
    // The voice line was still attempted and written.
    assert!(outcomes[1].succeeded);
    assert_eq!(fs::read(assets.path().join("start.mp3")).unwrap(), b"audio");
    assert_eq!(counter.closes(), 1);
}

#[tokio::test]
async fn mixed_run_summary_reports_partial_success() {
    let assets = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    fs::write(downloads.path().join("track.mp3"), b"bgm").unwrap();

    let counter = CloseCounter::default();
    let agent = ScriptedAgent::succeeding("completed", counter);
    let synth = ScriptedSynthesizer::new()
        .with_chunks("Ready, Go!", vec![b"a".to_vec()])
        .with_failure("Unbelievable!", "rate limited")
        .with_chunks("Game Over", vec![b"b".to_vec()]);

    let orchestrator = Orchestrator::new(assets.path(), ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(InteractiveAgentBackend::new(agent)))
        .with_backend(Box::new(DirectSynthesisBackend::new(synth)));

    let jobs = vec![
        bgm_job(&assets),
        voice_job(&assets, "start", "Ready, Go!"),
        voice_job(&assets, "combo", "Unbelievable!"),
        voice_job(&assets, "gameover", "Game Over"),
    ];
    let summary = orchestrator.run(&jobs).await.unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.succeeded_count, 3);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0.as_str(), "combo");
    assert!(summary.failures[0].1.contains("rate limited"));
    assert!(!summary.all_succeeded());
}

#[tokio::test]
async fn asset_directory_is_created_idempotently() {
    let parent = TempDir::new().unwrap();
    let assets = parent.path().join("nested").join("assets");
    let downloads = TempDir::new().unwrap();

    let synth = ScriptedSynthesizer::new();
    let orchestrator = Orchestrator::new(&assets, ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(DirectSynthesisBackend::new(synth)));

    // Two runs against the same directory; the second must not fail on
    // the pre-existing directory.
    orchestrator.execute_all(&[]).await.unwrap();
    orchestrator.execute_all(&[]).await.unwrap();
    assert!(assets.is_dir());
}

#[tokio::test]
async fn emit_is_side_effect_free_on_the_asset_dir() {
    let assets = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let synth = ScriptedSynthesizer::new().with_chunks("hi", vec![b"x".to_vec()]);
    let orchestrator = Orchestrator::new(assets.path(), ArtifactResolver::new(downloads.path()))
        .with_backend(Box::new(DirectSynthesisBackend::new(synth)));

    let outcomes = orchestrator
        .execute_all(&[voice_job(&assets, "a", "hi")])
        .await
        .unwrap();
    let before = fs::read_dir(assets.path()).unwrap().count();

    let summary = ResultReporter::summarize(&outcomes);
    ResultReporter::emit(&outcomes, &summary);

    let after = fs::read_dir(assets.path()).unwrap().count();
    assert_eq!(before, after);
}
