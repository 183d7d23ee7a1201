//! Code editor behavior.
//!
//! - [`Debouncer`] keeps at most one pending evaluation and restarts its
//!   timer on every schedule.
//! - [`EditorSession`] owns the buffer and publishes feedback hints on a
//!   watch channel after the debounce window.
//! - [`CodeRunner`] simulates "run code" with a fixed delay and canned
//!   output, one run at a time.

use crate::feedback::{Hint, SyntaxFeedback};
use crate::{ApplicationError, ApplicationResult};
use codearena_common::EditorConfig;
use codearena_domain::SubmissionRecord;
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Delays a task until no newer task has been scheduled for `delay`.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Abort any pending task and schedule `task` after the delay.
    ///
    /// Must be called within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled task has not run yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Gutter line numbers for `text`; an empty buffer still shows line 1.
pub fn line_numbers(text: &str) -> RangeInclusive<usize> {
    1..=text.split('\n').count()
}

/// An open editor: buffer, language and the latest feedback.
pub struct EditorSession {
    language: String,
    buffer: String,
    feedback: Arc<SyntaxFeedback>,
    debouncer: Debouncer,
    hints: Arc<watch::Sender<Vec<Hint>>>,
}

impl EditorSession {
    pub fn new(language: impl Into<String>, feedback: Arc<SyntaxFeedback>, debounce: Duration) -> Self {
        let (hints, _) = watch::channel(Vec::new());
        Self {
            language: language.into(),
            buffer: String::new(),
            feedback,
            debouncer: Debouncer::new(debounce),
            hints: Arc::new(hints),
        }
    }

    /// Session with the configured language and debounce window
    pub fn from_config(config: &EditorConfig, feedback: Arc<SyntaxFeedback>) -> Self {
        Self::new(config.default_language.clone(), feedback, config.debounce())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        self.reschedule();
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn line_numbers(&self) -> RangeInclusive<usize> {
        line_numbers(&self.buffer)
    }

    /// Receiver that sees every published hint list
    pub fn subscribe(&self) -> watch::Receiver<Vec<Hint>> {
        self.hints.subscribe()
    }

    /// Most recently published hints
    pub fn hints(&self) -> Vec<Hint> {
        self.hints.borrow().clone()
    }

    /// Replace the buffer and restart the feedback timer
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.reschedule();
    }

    /// Copy a past submission's code and language into the buffer.
    pub fn load_submission(&mut self, submission: &SubmissionRecord) {
        info!(submission = %submission.id, "Reverting buffer to submission");
        self.language = submission.language.clone();
        self.edit(submission.code.clone());
    }

    /// Clear the buffer
    pub fn reset(&mut self) {
        self.edit(String::new());
    }

    /// Analyze the buffer immediately, skipping the debounce window
    pub fn evaluate_now(&mut self) -> Vec<Hint> {
        self.debouncer.cancel();
        let hints = self.feedback.analyze(&self.language, &self.buffer);
        self.hints.send_replace(hints.clone());
        hints
    }

    /// Whether an evaluation is waiting for the debounce window
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn reschedule(&mut self) {
        let feedback = Arc::clone(&self.feedback);
        let hints = Arc::clone(&self.hints);
        let language = self.language.clone();
        let buffer = self.buffer.clone();
        debug!(bytes = buffer.len(), "Feedback scheduled");
        self.debouncer.schedule(async move {
            let result = feedback.analyze(&language, &buffer);
            hints.send_replace(result);
        });
    }
}

/// Result of a simulated run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub output: String,
}

impl RunOutcome {
    pub const SIMULATED_OUTPUT: &'static str =
        "Code executed successfully!\nExecution time: 0.05s\nMemory used: 5.2MB";

    pub fn simulated() -> Self {
        Self {
            output: Self::SIMULATED_OUTPUT.to_string(),
        }
    }
}

#[derive(Default)]
struct RunnerInner {
    running: bool,
    completed: u64,
}

/// Simulated code execution.
#[derive(Clone)]
pub struct CodeRunner {
    delay: Duration,
    inner: Arc<Mutex<RunnerInner>>,
}

/// Clears the running flag even when the run future is dropped early
struct RunGuard<'a>(&'a Mutex<RunnerInner>);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().running = false;
    }
}

impl CodeRunner {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: Arc::new(Mutex::new(RunnerInner::default())),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.run_delay())
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Number of runs that finished
    pub fn completed(&self) -> u64 {
        self.inner.lock().completed
    }

    /// Wait out the run delay and return the canned output.
    ///
    /// The code is not executed. A second call while one is in flight
    /// fails with [`ApplicationError::Busy`].
    pub async fn run(&self, code: &str) -> ApplicationResult<RunOutcome> {
        {
            let mut inner = self.inner.lock();
            if inner.running {
                return Err(ApplicationError::Busy("A run is already in progress".to_string()));
            }
            inner.running = true;
        }
        let _guard = RunGuard(&self.inner);

        debug!(bytes = code.len(), delay_ms = self.delay.as_millis() as u64, "Run started");
        tokio::time::sleep(self.delay).await;
        self.inner.lock().completed += 1;
        info!("Run finished");
        Ok(RunOutcome::simulated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::HintKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn session() -> EditorSession {
        EditorSession::new("javascript", Arc::new(SyntaxFeedback::default()), DEBOUNCE)
    }

    #[test]
    fn test_line_numbers() {
        assert_eq!(line_numbers(""), 1..=1);
        assert_eq!(line_numbers("a\nb\nc"), 1..=3);
        assert_eq!(line_numbers("a\n"), 1..=2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_runs_only_last_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DEBOUNCE);

        for value in [1, 2, 3] {
            let counter = Arc::clone(&counter);
            debouncer.schedule(async move {
                counter.fetch_add(value, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_drop_cancels() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let mut debouncer = Debouncer::new(DEBOUNCE);
            let counter = Arc::clone(&counter);
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_publishes_after_quiet_period() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.edit("function f() {\n  console.log(1)\n");
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(session.hints().is_empty());
        assert!(session.is_pending());

        rx.changed().await.unwrap();
        let hints = rx.borrow().clone();
        assert_eq!(hints[0].kind, HintKind::SyntaxError);
        assert!(hints.iter().any(|h| h.kind == HintKind::Note));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_submission_copies_code() {
        let record = codearena_testing::builders::SubmissionBuilder::new()
            .code("function twoSum(nums, target) { return [0, 1]; }")
            .build();
        let mut session = session();
        session.load_submission(&record);
        assert_eq!(session.buffer(), record.code);
        assert_eq!(session.language(), record.language);

        session.reset();
        assert_eq!(session.buffer(), "");
        assert!(session.evaluate_now().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_delay_and_busy() {
        let runner = CodeRunner::new(Duration::from_millis(1000));
        let first = {
            let runner = runner.clone();
            tokio::spawn(async move { runner.run("1 + 1").await })
        };
        tokio::task::yield_now().await;
        assert!(runner.is_running());

        let second = runner.run("2 + 2").await;
        assert!(matches!(second, Err(ApplicationError::Busy(_))));

        let start = tokio::time::Instant::now();
        let outcome = first.await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(999));
        assert_eq!(outcome.output, RunOutcome::SIMULATED_OUTPUT);
        assert!(!runner.is_running());
        assert_eq!(runner.completed(), 1);
    }
}
