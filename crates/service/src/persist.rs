//! Fire-and-forget persistence of wizard step deltas.
//!
//! At-most-once, non-blocking, no retry: a failed write is logged and the
//! in-memory state stays authoritative until the next successful write
//! supersedes it. The queue isolates delivery semantics behind one type so
//! a future move to at-least-once retries stays a local change.

use std::sync::Arc;

use sitepilot_core::StepData;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session_service::SessionService;

struct StepWrite {
    domain: String,
    step: StepData,
}

enum Command {
    Write(StepWrite),
    Flush(tokio::sync::oneshot::Sender<()>),
}

/// Background queue draining step writes into the session store.
pub struct StepQueue {
    tx: mpsc::UnboundedSender<Command>,
    worker: JoinHandle<()>,
}

impl StepQueue {
    /// Spawn the worker task that drains writes into the store.
    #[must_use]
    pub fn spawn(sessions: Arc<SessionService>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
        let worker = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Write(write) => {
                        if let Err(e) = sessions.record_step(&write.domain, &write.step).await {
                            tracing::warn!(
                                domain = %write.domain,
                                step_number = write.step.step_number(),
                                error = %e,
                                "background step write failed; in-memory state stays authoritative"
                            );
                        }
                    },
                    Command::Flush(ack) => {
                        // FIFO ordering: everything enqueued before the flush
                        // has already been attempted.
                        let _ = ack.send(());
                    },
                }
            }
        });
        Self { tx, worker }
    }

    /// Enqueue one step write. Never blocks and never fails the caller.
    pub fn enqueue(&self, domain: &str, step: StepData) {
        if self.tx.send(Command::Write(StepWrite { domain: domain.to_owned(), step })).is_err() {
            tracing::warn!(domain, "step queue closed, dropping write");
        }
    }

    /// Wait until every previously enqueued write has been attempted.
    pub async fn flush(&self) {
        let (tx, rx) = tokio::sync::oneshot::channel();
        if self.tx.send(Command::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Close the queue and drain outstanding writes.
    pub async fn close(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::warn!(error = %e, "step queue worker panicked");
        }
    }
}
