//! Bounded-concurrency batch driver.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task;
use tracing::{info, warn};

use strafe_demo::DemoBackend;

use crate::config::BatchConfig;
use crate::discover::walk_demos;
use crate::error::BatchError;
use crate::outcome::{BatchSummary, FileOutcome};
use crate::pipeline::{analyze_demo, report_path, verbose_summary};

/// Runs independent per-file analyses with a concurrency ceiling.
///
/// Discovery spawns one task per file and may run ahead of execution; a
/// semaphore gates how many tasks do decode work at once. Each task wraps
/// its work in a fault boundary: errors and panics become a recorded
/// outcome, the partially written report is removed, and the batch keeps
/// going. There is no cancellation and no retry.
pub struct BatchDriver {
    backend: Arc<dyn DemoBackend>,
    config: BatchConfig,
}

impl BatchDriver {
    /// Create a driver over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn DemoBackend>, config: BatchConfig) -> Self {
        Self { backend, config }
    }

    /// Analyze a single demo file.
    pub async fn run_file(&self, path: PathBuf) -> BatchSummary {
        let outcome = run_task(
            Arc::clone(&self.backend),
            path,
            self.config.clone(),
        )
        .await;
        BatchSummary {
            outcomes: vec![outcome],
        }
    }

    /// Walk `root` and analyze every matching file.
    ///
    /// # Errors
    ///
    /// A directory-walk error stops discovery immediately; analyses already
    /// started drain to completion, then the error is returned.
    pub async fn run_dir(&self, root: &Path) -> Result<BatchSummary, BatchError> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut walk_error = None;

        for found in walk_demos(root, &self.config.extension) {
            let path = match found {
                Ok(path) => path,
                Err(err) => {
                    walk_error = Some(err);
                    break;
                }
            };
            println!("Parsing demo file: {}", path.display());
            let backend = Arc::clone(&self.backend);
            let config = self.config.clone();
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                let outcome = run_task(backend, path, config).await;
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        match walk_error {
            Some(err) => Err(err),
            None => Ok(BatchSummary { outcomes }),
        }
    }
}

/// One file's fault boundary.
async fn run_task(
    backend: Arc<dyn DemoBackend>,
    path: PathBuf,
    config: BatchConfig,
) -> FileOutcome {
    let task_path = path.clone();
    let verbose = config.verbose;
    let joined =
        task::spawn_blocking(move || analyze_demo(backend.as_ref(), &task_path, &config)).await;
    match joined {
        Ok(Ok(report)) => {
            if verbose {
                print!("{}", verbose_summary(&report));
            }
            info!(path = %path.display(), rows = report.rows.len(), "analysis complete");
            FileOutcome::success(path)
        }
        Ok(Err(err)) => {
            warn!(path = %path.display(), error = %err, "analysis failed");
            discard_report(&path);
            FileOutcome::failure(path, err)
        }
        Err(join_err) => {
            warn!(path = %path.display(), "analysis panicked");
            discard_report(&path);
            FileOutcome::failure(path, format!("analysis aborted: {join_err}"))
        }
    }
}

fn discard_report(path: &Path) {
    // The report may not have been created yet; nothing to do then.
    let _ = fs::remove_file(report_path(path));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use strafe_core::{ButtonMask, PlayerId, Tick, IN_FORWARD};
    use strafe_demo::{
        DemoEvent, DemoResult, DemoSession, EventSink, JournalBackend, JournalWriter,
    };

    fn write_journal(path: &Path, events: &[DemoEvent]) {
        let mut writer = JournalWriter::new(Vec::new());
        for event in events {
            writer.write(event).unwrap();
        }
        fs::write(path, writer.finish().unwrap()).unwrap();
    }

    fn good_events(player: u64) -> Vec<DemoEvent> {
        vec![
            DemoEvent::PlayerSeen {
                player: PlayerId::from_raw(player),
                name: format!("player{player}"),
            },
            DemoEvent::ButtonsChanged {
                player: PlayerId::from_raw(player),
                buttons: ButtonMask::new(IN_FORWARD),
                tick: Tick::from_raw(0),
            },
            DemoEvent::ButtonsChanged {
                player: PlayerId::from_raw(player),
                buttons: ButtonMask::empty(),
                tick: Tick::from_raw(32),
            },
        ]
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_faulty_file_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        for i in 1..=10 {
            let path = dir.path().join(format!("match{i:02}.dem"));
            if i == 5 {
                fs::write(&path, b"garbage that is not an event\n").unwrap();
            } else {
                write_journal(&path, &good_events(i));
            }
        }

        let driver = BatchDriver::new(
            Arc::new(JournalBackend::new()),
            BatchConfig::default().with_max_concurrent(3),
        );
        let summary = driver.run_dir(dir.path()).await.unwrap();

        assert_eq!(summary.outcomes.len(), 10);
        assert_eq!(summary.succeeded(), 9);
        assert_eq!(summary.failed(), 1);

        let failed: Vec<_> = summary.failures().collect();
        assert!(failed[0].path.ends_with("match05.dem"));

        // The failed file's report is gone, every other report exists.
        assert!(!dir.path().join("match05.csv").exists());
        for i in (1..=10).filter(|&i| i != 5) {
            assert!(dir.path().join(format!("match{i:02}.csv")).exists());
        }
    }

    struct GatedBackend {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    struct GatedSession {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl strafe_demo::DemoBackend for GatedBackend {
        fn open(
            &self,
            _reader: Box<dyn BufRead + Send>,
        ) -> DemoResult<Box<dyn DemoSession + Send>> {
            Ok(Box::new(GatedSession {
                active: Arc::clone(&self.active),
                peak: Arc::clone(&self.peak),
            }))
        }
    }

    impl DemoSession for GatedSession {
        fn run(&mut self, sink: &mut dyn EventSink) -> DemoResult<()> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(40));
            self.active.fetch_sub(1, Ordering::SeqCst);
            sink.accept(&DemoEvent::StreamEnd { tick: Tick::zero() });
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrency_ceiling_respected() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("m{i}.dem")), b"").unwrap();
        }

        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let driver = BatchDriver::new(
            Arc::new(GatedBackend {
                active: Arc::clone(&active),
                peak: Arc::clone(&peak),
            }),
            BatchConfig::default().with_max_concurrent(2),
        );
        let summary = driver.run_dir(dir.path()).await.unwrap();

        assert_eq!(summary.outcomes.len(), 5);
        assert_eq!(summary.failed(), 0);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    struct PanickyBackend;

    struct PanickySession;

    impl strafe_demo::DemoBackend for PanickyBackend {
        fn open(
            &self,
            _reader: Box<dyn BufRead + Send>,
        ) -> DemoResult<Box<dyn DemoSession + Send>> {
            Ok(Box::new(PanickySession))
        }
    }

    impl DemoSession for PanickySession {
        fn run(&mut self, _sink: &mut dyn EventSink) -> DemoResult<()> {
            panic!("decoder blew up");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panic_becomes_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boom.dem");
        fs::write(&path, b"").unwrap();

        let driver = BatchDriver::new(Arc::new(PanickyBackend), BatchConfig::default());
        let summary = driver.run_file(path.clone()).await;

        assert_eq!(summary.failed(), 1);
        assert!(summary.outcomes[0].error.as_deref().unwrap().contains("aborted"));
        assert!(!dir.path().join("boom.csv").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_walk_error_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let driver = BatchDriver::new(Arc::new(JournalBackend::new()), BatchConfig::default());
        let result = driver.run_dir(&missing).await;
        assert!(matches!(result, Err(BatchError::Walk(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_single_file_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solo.dem");
        write_journal(&path, &good_events(1));

        let driver = BatchDriver::new(Arc::new(JournalBackend::new()), BatchConfig::default());
        let summary = driver.run_file(path.clone()).await;

        assert_eq!(summary.succeeded(), 1);
        assert!(dir.path().join("solo.csv").exists());
    }
}
