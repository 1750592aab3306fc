use std::time::Duration;

use chrono::Utc;

use reviewbot_common::error::{BotError, ErrorKind, Result};
use reviewbot_engine::ledger::ErrorLedger;
use reviewbot_engine::tracker::StatusTracker;
use reviewbot_engine::{translator, validator};
use reviewbot_notifier::NotificationSink;

use crate::source::HomeworkSource;

/// What a single polling cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Notified,
    /// A new status message was produced but could not be delivered.
    DeliveryFailed,
    /// The latest homework status matches the last delivered one.
    Unchanged,
    /// The API returned no homework in the requested window.
    NoUpdates,
    /// The cycle failed with an error of this kind.
    Failed(ErrorKind),
}

/// Homework poller that fetches statuses on a fixed interval and reports changes.
pub struct HomeworkPoller<S, N> {
    source: S,
    sink: N,
    retry_interval: Duration,
    /// Lower bound (Unix seconds) of the next fetch window.
    cursor: i64,
    status: StatusTracker,
    ledger: ErrorLedger,
}

impl<S, N> HomeworkPoller<S, N>
where
    S: HomeworkSource,
    N: NotificationSink,
{
    pub fn new(source: S, sink: N, retry_interval: Duration, start_from_date: i64) -> Self {
        Self {
            source,
            sink,
            retry_interval,
            cursor: start_from_date,
            status: StatusTracker::new(),
            ledger: ErrorLedger::new(),
        }
    }

    /// Start the polling loop. Runs indefinitely until the task is cancelled.
    pub async fn run(&mut self) {
        tracing::info!(
            from_date = self.cursor,
            retry_interval_secs = self.retry_interval.as_secs(),
            "Homework poller started"
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(?outcome, next_from_date = self.cursor, "Polling cycle finished");

            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one fetch-validate-notify cycle.
    ///
    /// Errors never escape: they are logged, reported once per kind, and the
    /// cursor moves on to the current time either way.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(error) => {
                let kind = error.kind();
                self.handle_failure(&error).await;
                CycleOutcome::Failed(kind)
            }
        };

        // Failed windows are skipped, not retried
        self.cursor = Utc::now().timestamp();
        outcome
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome> {
        let raw = self.source.fetch(self.cursor).await?;
        let homeworks = validator::validate(raw)?;

        let Some(first) = homeworks.into_iter().next() else {
            tracing::debug!(from_date = self.cursor, "No new homework statuses");
            return Ok(CycleOutcome::NoUpdates);
        };

        // Older entries are never read, so only the latest one is shape-checked
        let latest = validator::parse_record(first)?;
        let message = translator::translate(&latest)?;

        if !self.status.update(&message) {
            tracing::debug!("Homework status unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        match self.sink.send(&message).await {
            Ok(()) => {
                tracing::info!(
                    homework = latest.homework_name.as_deref().unwrap_or_default(),
                    status = latest.status.as_deref().unwrap_or_default(),
                    "Status change delivered"
                );
                Ok(CycleOutcome::Notified)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to deliver status change");
                Ok(CycleOutcome::DeliveryFailed)
            }
        }
    }

    /// Log a cycle failure and report it to the chat unless its kind was already reported.
    async fn handle_failure(&mut self, error: &BotError) {
        let kind = error.kind();
        tracing::error!(kind = %kind, error = %error, from_date = self.cursor, "Polling cycle failed");

        if !self.ledger.should_report(kind) {
            tracing::debug!(kind = %kind, "Failure already reported, skipping notification");
            return;
        }

        let message = format!("Program failure: {}", error);
        match self.sink.send(&message).await {
            Ok(()) => self.ledger.mark_reported(kind),
            Err(e) => {
                tracing::error!(
                    kind = %kind,
                    error = %e,
                    "Failed to report failure, will retry on next occurrence"
                );
            }
        }
    }

    /// Current lower bound of the fetch window.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Last status message accepted for delivery.
    pub fn last_status(&self) -> Option<&str> {
        self.status.last_message()
    }
}
