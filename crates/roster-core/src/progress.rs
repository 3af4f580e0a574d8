//! Progress counters and log lines emitted while an import runs.

use roster_model::{ImportLog, LogLevel, LogLine, ProgressState};
use serde::Serialize;

/// Event delivered to the caller as the run advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Progress(ProgressState),
    Log(LogLine),
}

/// Receives [`ImportEvent`]s. Any `FnMut(&ImportEvent) + Send` closure works.
pub trait ImportObserver: Send {
    fn on_event(&mut self, event: &ImportEvent);
}

impl<F> ImportObserver for F
where
    F: FnMut(&ImportEvent) + Send,
{
    fn on_event(&mut self, event: &ImportEvent) {
        self(event)
    }
}

/// Observer that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ImportObserver for NoopObserver {
    fn on_event(&mut self, _event: &ImportEvent) {}
}

/// What an execution run changed in the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CreationCounts {
    pub units_created: usize,
    pub units_unresolved: usize,
    pub people_created: usize,
    pub people_existing: usize,
    pub teams_created: usize,
    pub teams_replaced: usize,
    pub teams_unchanged: usize,
    pub groups_skipped: usize,
}

impl CreationCounts {
    /// Number of remote mutations the run performed.
    pub fn mutations(&self) -> usize {
        self.units_created + self.people_created + self.teams_created + self.teams_replaced
    }
}

/// Owns the progress counter, the log and the counts for one run, and
/// forwards every change to the observer.
pub struct Reporter<'o> {
    progress: ProgressState,
    log: ImportLog,
    counts: CreationCounts,
    observer: &'o mut dyn ImportObserver,
}

impl<'o> Reporter<'o> {
    pub fn new(total: usize, observer: &'o mut dyn ImportObserver) -> Self {
        let progress = ProgressState::new(total);
        observer.on_event(&ImportEvent::Progress(progress));
        Self {
            progress,
            log: ImportLog::new(),
            counts: CreationCounts::default(),
            observer,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message.into());
    }

    /// Marks one step done. Never moves past `total`.
    pub fn advance(&mut self) {
        if self.progress.done < self.progress.total {
            self.progress.done += 1;
        }
        self.observer.on_event(&ImportEvent::Progress(self.progress));
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn log(&self) -> &ImportLog {
        &self.log
    }

    pub fn counts(&self) -> &CreationCounts {
        &self.counts
    }

    pub fn counts_mut(&mut self) -> &mut CreationCounts {
        &mut self.counts
    }

    pub fn finish(self) -> (ProgressState, ImportLog, CreationCounts) {
        (self.progress, self.log, self.counts)
    }

    fn push(&mut self, level: LogLevel, message: String) {
        let line = LogLine { level, message };
        self.observer.on_event(&ImportEvent::Log(line.clone()));
        self.log.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_events_in_order() {
        let mut events = Vec::new();
        let mut observer = |event: &ImportEvent| events.push(event.clone());
        let mut reporter = Reporter::new(2, &mut observer);
        reporter.info("created unit \"HQ\"");
        reporter.advance();
        reporter.warn("unit \"Ghost\" not found");
        reporter.advance();
        reporter.advance();
        let (progress, log, _) = reporter.finish();

        assert_eq!(progress, ProgressState { done: 2, total: 2 });
        assert_eq!(log.warning_count(), 1);
        assert_eq!(events.len(), 6);
        assert_eq!(
            events.first(),
            Some(&ImportEvent::Progress(ProgressState::new(2)))
        );
        assert!(matches!(&events[1], ImportEvent::Log(line) if line.level == LogLevel::Info));
    }
}
