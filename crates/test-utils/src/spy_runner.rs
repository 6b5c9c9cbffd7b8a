use std::collections::VecDeque;
use std::sync::Mutex;

use cardano_runner::errors::Result;
use cardano_runner::exec::{BoxFuture, CommandRunner, Invocation};

enum Reply {
    Stdout(String),
    Failure(String),
}

/// A command runner that never spawns anything.
///
/// - records every invocation it receives
/// - answers from a queue of canned replies, then falls back to a default
///   stdout (empty unless set with [`SpyRunner::with_default`])
pub struct SpyRunner {
    calls: Mutex<Vec<Invocation>>,
    replies: Mutex<VecDeque<Reply>>,
    default_stdout: String,
}

impl SpyRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            default_stdout: String::new(),
        }
    }

    pub fn with_default(mut self, stdout: &str) -> Self {
        self.default_stdout = stdout.to_string();
        self
    }

    /// Queue a successful reply; stdout is trimmed like the real invoker does.
    pub fn reply(self, stdout: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Stdout(stdout.trim().to_string()));
        self
    }

    /// Queue a failing reply carrying `diagnostic` as the stderr text.
    pub fn fail(self, diagnostic: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Failure(diagnostic.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Arguments of the most recent invocation.
    pub fn last_args(&self) -> Option<Vec<String>> {
        self.calls.lock().unwrap().last().map(|c| c.args.clone())
    }
}

impl Default for SpyRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SpyRunner {
    fn run(&self, invocation: Invocation) -> BoxFuture<'_, Result<String>> {
        let reply = self.replies.lock().unwrap().pop_front();
        self.calls.lock().unwrap().push(invocation.clone());

        let outcome = match reply {
            Some(Reply::Stdout(out)) => Ok(out),
            Some(Reply::Failure(msg)) => Err(invocation.failure(msg)),
            None => Ok(self.default_stdout.clone()),
        };
        Box::pin(async move { outcome })
    }
}
