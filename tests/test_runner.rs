// Integration tests for Runner module
// This file should be run with cargo test --test test_runner

#[path = "../src/model/mod.rs"]
mod model;

#[path = "../src/executor/mod.rs"]
mod executor;

#[path = "../src/runner/mod.rs"]
mod runner;

mod common;

use common::{MockFetcher, MockProcess, Reply, init_tracing};
use model::{ContentType, ExecutionRequest, ExecutionStatus, TestContent};
use runner::{RunnerConfig, RunnerError, TracetestRunner};
use std::sync::Arc;

struct Harness {
    _dir: tempfile::TempDir,
    runner: TracetestRunner,
    process: Arc<MockProcess>,
    fetcher: Arc<MockFetcher>,
}

fn harness(replies: Vec<Reply>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = RunnerConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let process = Arc::new(MockProcess::new(replies));
    let fetcher = Arc::new(MockFetcher::new(dir.path().join("test.yaml")));
    let runner = TracetestRunner::with_parts(config, fetcher.clone(), process.clone());
    Harness {
        _dir: dir,
        runner,
        process,
        fetcher,
    }
}

fn request() -> ExecutionRequest {
    ExecutionRequest::new(TestContent::inline("type: Test"))
}

fn cloud_request() -> ExecutionRequest {
    request()
        .with_variable("TRACETEST_TOKEN", "tok-123")
        .with_variable("TRACETEST_ORGANIZATION", "acme")
        .with_variable("TRACETEST_ENVIRONMENT", "staging")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Passing run through the core backend
    #[tokio::test]
    async fn test_core_run_passed() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✔ all good",
            code: 0,
        }]);
        let req = request().with_variable("TRACETEST_ENDPOINT", "http://x");

        let result = h.runner.run(&req).await.expect("run should succeed");

        assert_eq!(result.status, ExecutionStatus::Passed);
        assert_eq!(result.output, "✔ all good");
        assert!(result.error_message.is_none());

        let calls = h.process.calls();
        assert_eq!(calls.len(), 1, "core has no configure step");
        let file = h.fetcher.path.display().to_string();
        assert_eq!(calls[0].program, "tracetest");
        assert_eq!(
            calls[0].args,
            vec![
                "run",
                "test",
                "--server-url",
                "http://x",
                "--file",
                file.as_str(),
                "--output",
                "pretty"
            ]
        );
    }

    /// Failing run is a failed result, not an error
    #[tokio::test]
    async fn test_core_run_failed() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✘ failed step",
            code: 1,
        }]);
        let req = request().with_variable("TRACETEST_ENDPOINT", "http://x");

        let result = h.runner.run(&req).await.expect("test failure is not an error");

        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.output, "✘ failed step");
        assert_eq!(result.error_message.as_deref(), Some("✘ failed step"));
    }

    /// Cloud variables take priority over the core endpoint
    #[tokio::test]
    async fn test_cloud_priority() {
        init_tracing();

        let h = harness(vec![
            Reply::Exit {
                stdout: "configured",
                code: 0,
            },
            Reply::Exit {
                stdout: "✔ cloud run",
                code: 0,
            },
        ]);
        let req = cloud_request().with_variable("TRACETEST_ENDPOINT", "http://core:11633");

        let result = h.runner.run(&req).await.unwrap();
        assert_eq!(result.status, ExecutionStatus::Passed);
        assert_eq!(result.output, "✔ cloud run");

        let calls = h.process.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].args,
            vec![
                "configure",
                "--token",
                "tok-123",
                "--organization",
                "acme",
                "--environment",
                "staging"
            ]
        );
        assert_eq!(&calls[1].args[..2], &["run", "test"]);
        assert!(
            !calls[1].args.iter().any(|a| a == "--server-url"),
            "cloud run carries no endpoint"
        );
    }

    /// Failed configure stops before the run
    #[tokio::test]
    async fn test_cloud_configure_failure() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✘ invalid token",
            code: 1,
        }]);

        let result = h.runner.run(&cloud_request()).await.unwrap();

        assert_eq!(h.process.calls().len(), 1, "no run after failed configure");
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.error_message.as_deref(), Some("✘ invalid token"));
    }

    /// Non-zero exit without a failure glyph is still a failed result
    #[tokio::test]
    async fn test_core_nonzero_exit_plain_text() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "Error: could not reach server http://x",
            code: 1,
        }]);
        let req = request().with_variable("TRACETEST_ENDPOINT", "http://x");

        let result = h.runner.run(&req).await.unwrap();

        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.output, "Error: could not reach server http://x");
        assert_eq!(
            result.error_message.as_deref(),
            Some("Error: could not reach server http://x")
        );
    }

    /// Plain-text configure failure is reported as failed
    #[tokio::test]
    async fn test_cloud_configure_failure_plain_text() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "Error: invalid token",
            code: 1,
        }]);

        let result = h.runner.run(&cloud_request()).await.unwrap();

        assert_eq!(h.process.calls().len(), 1);
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.error_message.as_deref(), Some("Error: invalid token"));
    }

    /// Neither variable set is complete
    #[tokio::test]
    async fn test_no_backend() {
        init_tracing();

        let h = harness(vec![]);
        let req = request().with_variable("TRACETEST_TOKEN", "tok");

        let err = h.runner.run(&req).await.unwrap_err();

        assert!(matches!(err, RunnerError::NoBackend { .. }));
        let msg = err.to_string();
        for name in [
            "TRACETEST_TOKEN",
            "TRACETEST_ORGANIZATION",
            "TRACETEST_ENVIRONMENT",
            "TRACETEST_ENDPOINT",
        ] {
            assert!(msg.contains(name), "{msg} should name {name}");
        }
        assert!(h.process.calls().is_empty(), "no subprocess expected");
    }

    /// Output endpoint rewrites links in both output and error message
    #[tokio::test]
    async fn test_output_endpoint_rewrite() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✘ see http://core:11633/test/1/run/2",
            code: 1,
        }]);
        let req = request()
            .with_variable("TRACETEST_ENDPOINT", "http://core:11633")
            .with_variable("TRACETEST_OUTPUT_ENDPOINT", "https://tracetest.example.com");

        let result = h.runner.run(&req).await.unwrap();

        let expected = "✘ see https://tracetest.example.com/test/1/run/2";
        assert_eq!(result.output, expected);
        assert_eq!(result.error_message.as_deref(), Some(expected));
    }

    /// Quotes around values are stripped before use
    #[tokio::test]
    async fn test_quoted_endpoint() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✔",
            code: 0,
        }]);
        let req = request().with_variable("TRACETEST_ENDPOINT", "\"http://core:11633\"");

        h.runner.run(&req).await.unwrap();

        let calls = h.process.calls();
        assert_eq!(calls[0].args[3], "http://core:11633");
        assert!(
            calls[0]
                .env
                .contains(&("TRACETEST_ENDPOINT".to_string(), "http://core:11633".to_string()))
        );
    }

    /// Extra execution args never reach the tool
    #[tokio::test]
    async fn test_args_not_forwarded() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✔",
            code: 0,
        }]);
        let mut req = request().with_variable("TRACETEST_ENDPOINT", "http://x");
        req.args = vec!["--verbose".to_string()];

        h.runner.run(&req).await.unwrap();

        assert!(!h.process.calls()[0].args.contains(&"--verbose".to_string()));
    }

    /// Secret values are masked in the reported output
    #[tokio::test]
    async fn test_secret_masked() {
        init_tracing();

        let h = harness(vec![
            Reply::Exit {
                stdout: "",
                code: 0,
            },
            Reply::Exit {
                stdout: "✔ authenticated with tok-123",
                code: 0,
            },
        ]);
        let req = request()
            .with_secret("TRACETEST_TOKEN", "tok-123")
            .with_variable("TRACETEST_ORGANIZATION", "acme")
            .with_variable("TRACETEST_ENVIRONMENT", "staging");

        let result = h.runner.run(&req).await.unwrap();
        assert_eq!(result.output, "✔ authenticated with ********");
    }

    /// Spawn failures propagate as errors
    #[tokio::test]
    async fn test_spawn_failure_propagates() {
        init_tracing();

        let h = harness(vec![Reply::SpawnFailure]);
        let req = request().with_variable("TRACETEST_ENDPOINT", "http://x");

        let err = h.runner.run(&req).await.unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Executor(executor::ExecutorError::SpawnFailed(..))
        ));
    }

    /// Missing data directory fails before fetching
    #[tokio::test]
    async fn test_data_dir_missing() {
        init_tracing();

        let process = Arc::new(MockProcess::default());
        let fetcher = Arc::new(MockFetcher::new("/nowhere/test.yaml"));
        let config = RunnerConfig {
            data_dir: "/definitely/not/a/data/dir".into(),
            ..Default::default()
        };
        let runner = TracetestRunner::with_parts(config, fetcher.clone(), process.clone());
        let req = request().with_variable("TRACETEST_ENDPOINT", "http://x");

        let err = runner.run(&req).await.unwrap_err();

        assert!(matches!(err, RunnerError::DataDirNotFound(_)));
        assert_eq!(fetcher.fetches(), 0);
        assert!(process.calls().is_empty());
    }

    /// Directory content is rejected
    #[tokio::test]
    async fn test_content_not_file() {
        init_tracing();

        let h = harness(vec![]);
        let mut req = request().with_variable("TRACETEST_ENDPOINT", "http://x");
        req.content = TestContent {
            content_type: ContentType::GitDir,
            data: None,
            uri: Some("https://example.com/tests.git".to_string()),
        };

        let err = h.runner.run(&req).await.unwrap_err();

        assert!(matches!(err, RunnerError::ContentNotFile(ContentType::GitDir)));
        assert_eq!(h.fetcher.fetches(), 0, "directory content is never fetched");
        assert!(h.process.calls().is_empty());
    }

    /// Directory content is rejected by the real fetcher wiring too
    #[tokio::test]
    async fn test_content_not_file_local_fetcher() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let config = RunnerConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let runner = TracetestRunner::new(config);
        let mut req = request().with_variable("TRACETEST_ENDPOINT", "http://x");
        req.content = TestContent {
            content_type: ContentType::GitDir,
            data: None,
            uri: Some("https://example.com/tests.git".to_string()),
        };

        let err = runner.run(&req).await.unwrap_err();

        assert!(matches!(err, RunnerError::ContentNotFile(ContentType::GitDir)));
    }

    /// Request JSON as produced by the orchestrator
    #[tokio::test]
    async fn test_request_from_json() {
        init_tracing();

        let h = harness(vec![Reply::Exit {
            stdout: "✔ ok",
            code: 0,
        }]);
        let req: ExecutionRequest = serde_json::from_value(serde_json::json!({
            "id": "exec-1",
            "content": { "type": "string", "data": "type: Test" },
            "variables": {
                "TRACETEST_ENDPOINT": { "name": "TRACETEST_ENDPOINT", "value": "http://x", "type": "basic" }
            }
        }))
        .unwrap();

        let result = h.runner.run(&req).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json, serde_json::json!({ "status": "passed", "output": "✔ ok" }));
    }
}
