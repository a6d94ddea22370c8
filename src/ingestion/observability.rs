use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{error, info, warn};

use crate::error::FoodDbError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Error-level event (the dataset is inconsistent or malformed).
    Error,
    /// Critical error (I/O or archive failures).
    Critical,
}

/// Context about the archive currently being loaded.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Path of the zip archive.
    pub archive: PathBuf,
}

/// Stats reported once every archive has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub archives: usize,
    /// Number of CSV data rows handed to the record parser.
    pub rows: usize,
    pub categories: usize,
    pub nutrients: usize,
    pub foods: usize,
    pub food_nutrients: usize,
}

/// Observer interface for loading progress and outcomes.
///
/// Every hook has an empty default so implementors only pick what they need.
pub trait LoadObserver: Send + Sync {
    /// Called before an archive is opened.
    fn on_archive_started(&self, _ctx: &LoadContext) {}

    /// Called for each archive entry that is not a CSV file.
    fn on_entry_skipped(&self, _ctx: &LoadContext, _entry: &str) {}

    /// Called before the rows of a CSV entry are parsed.
    fn on_entry_started(&self, _ctx: &LoadContext, _entry: &str) {}

    /// Called once every data row of a CSV entry has been parsed.
    fn on_entry_finished(&self, _ctx: &LoadContext, _entry: &str, _rows: usize) {}

    /// Called when every archive loaded successfully.
    fn on_success(&self, _stats: LoadStats) {}

    /// Called when loading an archive fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &FoodDbError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FoodDbError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_archive_started(&self, ctx: &LoadContext) {
        for o in &self.observers {
            o.on_archive_started(ctx);
        }
    }

    fn on_entry_skipped(&self, ctx: &LoadContext, entry: &str) {
        for o in &self.observers {
            o.on_entry_skipped(ctx, entry);
        }
    }

    fn on_entry_started(&self, ctx: &LoadContext, entry: &str) {
        for o in &self.observers {
            o.on_entry_started(ctx, entry);
        }
    }

    fn on_entry_finished(&self, ctx: &LoadContext, entry: &str, rows: usize) {
        for o in &self.observers {
            o.on_entry_finished(ctx, entry, rows);
        }
    }

    fn on_success(&self, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FoodDbError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FoodDbError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Writes the human-readable progress lines (`reading ZIP file: ...`, `reading CSV file: ...`)
/// to a writer, stdout by default.
///
/// Write failures are ignored; progress output is best-effort.
#[derive(Debug)]
pub struct ProgressObserver<W> {
    out: Mutex<W>,
}

impl ProgressObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ProgressObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn line(&self, args: fmt::Arguments<'_>) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_fmt(args);
            let _ = out.write_all(b"\n");
        }
    }
}

impl<W: Write + Send> LoadObserver for ProgressObserver<W> {
    fn on_archive_started(&self, ctx: &LoadContext) {
        self.line(format_args!("reading ZIP file: {}", ctx.archive.display()));
    }

    fn on_entry_skipped(&self, _ctx: &LoadContext, entry: &str) {
        self.line(format_args!("skipping non-CSV file: {entry}"));
    }

    fn on_entry_started(&self, _ctx: &LoadContext, entry: &str) {
        self.line(format_args!("reading CSV file: {entry}"));
    }
}

/// Forwards loading events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_archive_started(&self, ctx: &LoadContext) {
        info!("[load] archive={}", ctx.archive.display());
    }

    fn on_entry_skipped(&self, ctx: &LoadContext, entry: &str) {
        info!("[load][skip] archive={} entry={entry}", ctx.archive.display());
    }

    fn on_entry_finished(&self, ctx: &LoadContext, entry: &str, rows: usize) {
        info!(
            "[load][ok] archive={} entry={entry} rows={rows}",
            ctx.archive.display()
        );
    }

    fn on_success(&self, stats: LoadStats) {
        info!(
            "[load][done] archives={} rows={} categories={} nutrients={} foods={} food_nutrients={}",
            stats.archives,
            stats.rows,
            stats.categories,
            stats.nutrients,
            stats.foods,
            stats.food_nutrients
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FoodDbError) {
        warn!(
            "[load][{severity:?}] archive={} err={error}",
            ctx.archive.display()
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &FoodDbError) {
        error!(
            "[ALERT][load][{severity:?}] archive={} err={error}",
            ctx.archive.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::{CompositeObserver, LoadContext, LoadObserver, LoadSeverity, ProgressObserver};
    use crate::error::FoodDbError;

    fn ctx() -> LoadContext {
        LoadContext {
            archive: PathBuf::from("supporting.zip"),
        }
    }

    #[derive(Default)]
    struct Counting {
        entries: Mutex<Vec<String>>,
        failures: Mutex<Vec<LoadSeverity>>,
    }

    impl LoadObserver for Counting {
        fn on_entry_started(&self, _ctx: &LoadContext, entry: &str) {
            self.entries.lock().unwrap().push(entry.to_string());
        }

        fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &FoodDbError) {
            self.failures.lock().unwrap().push(severity);
        }
    }

    #[test]
    fn progress_observer_writes_progress_lines() {
        let obs = ProgressObserver::new(Vec::new());
        obs.on_archive_started(&ctx());
        obs.on_entry_skipped(&ctx(), "Download & API Field Descriptions.pdf");
        obs.on_entry_started(&ctx(), "nutrient.csv");
        obs.on_entry_finished(&ctx(), "nutrient.csv", 10);

        let out = String::from_utf8(obs.into_inner()).unwrap();
        assert_eq!(
            out,
            "reading ZIP file: supporting.zip\n\
             skipping non-CSV file: Download & API Field Descriptions.pdf\n\
             reading CSV file: nutrient.csv\n"
        );
    }

    #[test]
    fn composite_fans_out_and_alert_defaults_to_failure() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let observers: Vec<Arc<dyn LoadObserver>> = vec![a.clone(), b.clone()];
        let composite = CompositeObserver::new(observers);

        composite.on_entry_started(&ctx(), "food.csv");
        let err = FoodDbError::UnknownFood {
            fdc_id: "1".to_string(),
        };
        composite.on_alert(&ctx(), LoadSeverity::Error, &err);

        for o in [&a, &b] {
            assert_eq!(*o.entries.lock().unwrap(), vec!["food.csv".to_string()]);
            assert_eq!(*o.failures.lock().unwrap(), vec![LoadSeverity::Error]);
        }
    }

    #[test]
    fn severities_are_ordered() {
        assert!(LoadSeverity::Critical > LoadSeverity::Error);
    }
}
