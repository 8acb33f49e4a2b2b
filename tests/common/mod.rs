// Shared test doubles for the integration tests
#![allow(dead_code)]

use crate::executor::{ExecutorError, Invocation, ProcessOutput, ProcessRunner};
use crate::model::TestContent;
use crate::runner::{ContentFetcher, RunnerError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .init();
    });
}

/// Scripted reply for one process invocation
pub enum Reply {
    Exit { stdout: &'static str, code: i32 },
    SpawnFailure,
}

/// Process runner that replays scripted replies and records every invocation
#[derive(Default)]
pub struct MockProcess {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockProcess {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for MockProcess {
    async fn run(&self, invocation: &Invocation) -> crate::executor::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected process invocation");
        match reply {
            Reply::Exit { stdout, code } => Ok(ProcessOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                exit_code: Some(code),
            }),
            Reply::SpawnFailure => Err(ExecutorError::SpawnFailed(
                invocation.program.clone(),
                "No such file or directory (os error 2)".to_string(),
            )),
        }
    }
}

/// Fetcher that resolves every descriptor to a fixed path
pub struct MockFetcher {
    pub path: PathBuf,
    fetches: AtomicUsize,
}

impl MockFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, _content: &TestContent) -> Result<PathBuf, RunnerError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.path.clone())
    }
}
