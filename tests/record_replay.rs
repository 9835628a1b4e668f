//! Record-replay round-trip integration tests.
//!
//! 1. Drive the services through recording adapters wrapped around a
//!    replayed upstream, capturing a fresh per-port cassette directory.
//! 2. Replay that directory with `ServiceContext::replaying_path()`.
//! 3. Assert identical outputs between recording and replaying.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use repotest::adapters::recording::{RecordingClock, RecordingHostingApi, RecordingLlmClient};
use repotest::adapters::replaying::{ReplayingClock, ReplayingHostingApi, ReplayingLlmClient};
use repotest::cassette::config::CassetteConfig;
use repotest::cassette::recorder::CassetteRecorder;
use repotest::cassette::session::RecordingSession;
use repotest::classify::CodeFileRecord;
use repotest::context::ServiceContext;
use repotest::error::ServiceError;
use repotest::generate::{self, FileInput};
use repotest::repository;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("repotest_record_replay_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes the upstream a recording run talks to: one default branch, one
/// tree, one model completion and one clock reading.
fn write_upstream(dir: &std::path::Path) -> CassetteConfig {
    let hosting = dir.join("hosting.cassette.yaml");
    let mut rec = CassetteRecorder::new(&hosting, "upstream-hosting", "abc123");
    rec.record(
        "hosting",
        "default_branch",
        json!({"owner": "acme", "repo": "widgets"}),
        json!({"Ok": "trunk"}),
    );
    rec.record(
        "hosting",
        "tree",
        json!({"owner": "acme", "repo": "widgets", "branch": "trunk"}),
        json!({"Ok": [
            {"path": "src", "type": "tree", "sha": "t0"},
            {"path": "src/a.ts", "type": "blob", "sha": "s1", "size": 120},
            {"path": "README.md", "type": "blob", "sha": "s2", "size": 900},
            {"path": "lib/util.py", "type": "blob", "sha": "s3"},
            {"path": "vendor", "type": "commit", "sha": "s4"}
        ]}),
    );
    rec.finish().unwrap();

    let llm = dir.join("llm.cassette.yaml");
    let mut rec = CassetteRecorder::new(&llm, "upstream-llm", "abc123");
    rec.record(
        "llm",
        "complete",
        json!({}),
        json!({"Ok": {
            "text": "```json\n[{\"summaryId\":\"a-1\",\"summaryText\":\"Renders.\"}]\n```",
            "prompt_tokens": 80,
            "completion_tokens": 12
        }}),
    );
    rec.finish().unwrap();

    let clock = dir.join("clock.cassette.yaml");
    let mut rec = CassetteRecorder::new(&clock, "upstream-clock", "abc123");
    rec.record("clock", "now", json!({}), json!("2025-03-15T14:30:00Z"));
    rec.finish().unwrap();

    CassetteConfig {
        hosting: Some(hosting),
        llm: Some(llm),
        clock: Some(clock),
    }
}

fn files() -> Vec<FileInput> {
    vec![FileInput { filename: "src/a.ts".into(), content: "export const a = 1;".into() }]
}

#[tokio::test]
async fn listing_classifies_tree_end_to_end() {
    let dir = scratch_dir("listing");
    let config = write_upstream(&dir);
    let ctx = ServiceContext::replaying_from(&config).unwrap();

    let listing = repository::list_files(&ctx, "acme", "widgets").await.unwrap();
    assert_eq!(listing.branch, "trunk");
    assert_eq!(
        listing.files,
        vec![
            CodeFileRecord {
                path: "src/a.ts".into(),
                language: Some("TypeScript".into()),
                size: 120,
                sha: "s1".into(),
                download_url: Some(
                    "https://raw.githubusercontent.com/acme/widgets/trunk/src/a.ts".into()
                ),
            },
            CodeFileRecord {
                path: "lib/util.py".into(),
                language: Some("Python".into()),
                size: 0,
                sha: "s3".into(),
                download_url: Some(
                    "https://raw.githubusercontent.com/acme/widgets/trunk/lib/util.py".into()
                ),
            },
        ]
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let dir = scratch_dir("roundtrip");
    let upstream_dir = dir.join("upstream");
    std::fs::create_dir_all(&upstream_dir).unwrap();
    let upstream = write_upstream(&upstream_dir);
    let replayers = upstream.load_all().unwrap();

    // --- Phase 1: record against the replayed upstream ---
    let session = RecordingSession::new(&dir.join("recorded")).unwrap();
    let recording_ctx = ServiceContext {
        clock: Box::new(RecordingClock::new(
            Box::new(ReplayingClock::new(replayers.clock.unwrap())),
            Arc::clone(&session.clock),
        )),
        hosting: Some(Box::new(RecordingHostingApi::new(
            Box::new(ReplayingHostingApi::new(replayers.hosting.unwrap())),
            Arc::clone(&session.hosting),
        ))),
        llm: Some(Box::new(RecordingLlmClient::new(
            Box::new(ReplayingLlmClient::new(replayers.llm.unwrap())),
            Arc::clone(&session.llm),
        ))),
        model: "test-model".into(),
    };

    let recorded_listing = repository::list_files(&recording_ctx, "acme", "widgets").await.unwrap();
    let recorded_batch = generate::generate_summaries(&recording_ctx, &files()).await.unwrap();
    drop(recording_ctx);
    let recorded_dir = session.finish().unwrap();
    assert!(recorded_dir.join("hosting.cassette.yaml").exists());
    assert!(recorded_dir.join("llm.cassette.yaml").exists());
    assert!(recorded_dir.join("clock.cassette.yaml").exists());

    // --- Phase 2: replay the recording ---
    let replay_ctx = ServiceContext::replaying_path(&recorded_dir).unwrap();
    let replayed_listing = repository::list_files(&replay_ctx, "acme", "widgets").await.unwrap();
    let replayed_batch = generate::generate_summaries(&replay_ctx, &files()).await.unwrap();

    assert_eq!(recorded_listing, replayed_listing, "listing replay mismatch");
    assert_eq!(recorded_batch.summaries, replayed_batch.summaries, "summary replay mismatch");
    assert_eq!(recorded_batch.generated_at, replayed_batch.generated_at, "clock replay mismatch");
    assert_eq!(replayed_batch.summaries[0].summary_id, "a-1");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn recorded_failures_replay_as_failures() {
    let dir = scratch_dir("failure");
    let hosting = dir.join("hosting.cassette.yaml");
    let mut rec = CassetteRecorder::new(&hosting, "missing", "abc123");
    rec.record(
        "hosting",
        "default_branch",
        json!({"owner": "acme", "repo": "ghost"}),
        json!({"Err": "GitHub API error (404): Not Found"}),
    );
    rec.finish().unwrap();

    let ctx = ServiceContext::replaying_path(&dir).unwrap();
    let err = repository::list_files(&ctx, "acme", "ghost").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(!ctx.llm_configured());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unconfigured_ports_are_reported_by_the_context() {
    let ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
    assert!(!ctx.hosting_configured());
    assert!(!ctx.llm_configured());
}
