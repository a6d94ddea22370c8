//! Database builder: loads the supporting and foundation archives into one [`FoodDb`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use super::archive::for_each_csv_record;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use crate::error::{FoodDbError, FoodDbResult};
use crate::types::FoodDb;

/// Default location of the archive with categories, nutrients and other reference tables.
pub const SUPPORTING_DATA_ZIPPED_CSV: &str = "./FoodData_Central_Supporting_Data_csv_2021-04-28.zip";
/// Default location of the archive with foundation foods and their nutrient values.
pub const FOUNDATION_FOOD_ZIPPED_CSV: &str = "./FoodData_Central_Foundation_Food_csv_2021-04-28.zip";

/// Options controlling how the database is loaded.
///
/// Use [`Default`] for the standard FoodData Central file names in the working directory.
#[derive(Clone)]
pub struct LoadOptions {
    /// Loaded first: must provide every category and nutrient the foundation rows reference.
    pub supporting: PathBuf,
    /// Loaded second.
    pub foundation: PathBuf,
    /// Optional observer for progress output, logging and alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("supporting", &self.supporting)
            .field("foundation", &self.foundation)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            supporting: PathBuf::from(SUPPORTING_DATA_ZIPPED_CSV),
            foundation: PathBuf::from(FOUNDATION_FOOD_ZIPPED_CSV),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Archives in load order.
    pub fn archives(&self) -> [&Path; 2] {
        [self.supporting.as_path(), self.foundation.as_path()]
    }
}

impl FoodDb {
    /// Load every archive named by `options`, in order, into a new database.
    ///
    /// The whole database is materialized before this returns; the first error aborts the load.
    ///
    /// When an observer is configured, this function reports:
    ///
    /// - progress for each archive and entry
    /// - `on_success` with [`LoadStats`] once all archives are loaded
    /// - `on_failure` on failure, with a computed severity
    /// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use food_nutri::ingestion::{LoadOptions, ProgressObserver};
    /// use food_nutri::types::FoodDb;
    ///
    /// # fn main() -> Result<(), food_nutri::FoodDbError> {
    /// let opts = LoadOptions {
    ///     observer: Some(Arc::new(ProgressObserver::stdout())),
    ///     ..Default::default()
    /// };
    /// let db = FoodDb::load(&opts)?;
    /// println!("foods={}", db.food_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(options: &LoadOptions) -> FoodDbResult<Self> {
        let mut db = Self::new();
        for archive in options.archives() {
            db.load_archive(archive, options)?;
        }

        let stats = db.load_stats(options.archives().len());
        debug!("loaded {stats:?}");
        if let Some(obs) = options.observer.as_ref() {
            obs.on_success(stats);
        }
        Ok(db)
    }

    /// Load one archive into this database, reporting failures to the configured observer.
    ///
    /// Returns the number of data rows read from the archive.
    pub fn load_archive(&mut self, path: impl AsRef<Path>, options: &LoadOptions) -> FoodDbResult<usize> {
        let path = path.as_ref();
        let observer = options.observer.as_deref();
        let result = for_each_csv_record(path, observer, |table, record| {
            self.read_record(table, record)
        });

        if let (Some(obs), Err(e)) = (observer, &result) {
            let ctx = LoadContext {
                archive: path.to_path_buf(),
            };
            let sev = severity_for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }

        result
    }

    fn load_stats(&self, archives: usize) -> LoadStats {
        LoadStats {
            archives,
            rows: self.rows,
            categories: self.categories.len(),
            nutrients: self.nutrients.len(),
            foods: self.food_count(),
            food_nutrients: self.food_nutrient_count(),
        }
    }
}

/// Classify an error for observer callbacks and alert thresholds.
pub fn severity_for_error(e: &FoodDbError) -> LoadSeverity {
    match e {
        FoodDbError::Io(_) | FoodDbError::Zip(_) => LoadSeverity::Critical,
        FoodDbError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        FoodDbError::Json(_)
        | FoodDbError::MissingField { .. }
        | FoodDbError::UnknownCategory { .. }
        | FoodDbError::UnknownNutrient { .. }
        | FoodDbError::UnknownFood { .. } => LoadSeverity::Error,
    }
}
