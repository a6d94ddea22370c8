//! Zipped CSV traversal.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use memmap2::Mmap;
use piz::ZipArchive;

use super::observability::{LoadContext, LoadObserver};
use crate::error::FoodDbResult;

/// Visit every data row of every CSV entry in the zip archive at `path`.
///
/// Rules:
///
/// - Entries are visited in central-directory order.
/// - Entries whose name does not end in `.csv` are skipped (and reported as skipped).
/// - The first row of each CSV entry is a header and is not passed to `on_record`.
/// - `on_record` receives the table name: the entry's file name without directories and without
///   the `.csv` suffix.
/// - Fields that are not valid UTF-8 are decoded lossily (invalid bytes become U+FFFD) rather
///   than failing the load.
///
/// The first error (from the archive, the CSV reader, or `on_record`) stops the traversal.
/// Returns the number of data rows visited.
pub fn for_each_csv_record<F>(
    path: impl AsRef<Path>,
    observer: Option<&dyn LoadObserver>,
    mut on_record: F,
) -> FoodDbResult<usize>
where
    F: FnMut(&str, &StringRecord) -> FoodDbResult<()>,
{
    let path = path.as_ref();
    let ctx = LoadContext {
        archive: path.to_path_buf(),
    };
    if let Some(obs) = observer {
        obs.on_archive_started(&ctx);
    }

    info!("Memory mapping {}", path.display());
    let zip_file = File::open(path)?;
    // SAFETY: the mapping is read-only and dropped before returning; the archive is not expected
    // to be modified while it is being loaded.
    let mapping = unsafe { Mmap::map(&zip_file)? };
    let (archive, prepended) = ZipArchive::with_prepended_data(&mapping)?;
    if prepended > 0 {
        debug!("{} has {prepended} prepended bytes", path.display());
    }

    let mut rows = 0usize;
    for entry in archive.entries() {
        let name = entry.path.as_str();
        if !name.ends_with(".csv") {
            if let Some(obs) = observer {
                obs.on_entry_skipped(&ctx, name);
            }
            continue;
        }
        if let Some(obs) = observer {
            obs.on_entry_started(&ctx, name);
        }

        let table = table_name(name);
        let reader = archive.read(entry)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut entry_rows = 0usize;
        for raw in rdr.byte_records() {
            let record = StringRecord::from_byte_record_lossy(raw?);
            on_record(table, &record)?;
            entry_rows += 1;
        }

        debug!("{name}: {entry_rows} rows");
        if let Some(obs) = observer {
            obs.on_entry_finished(&ctx, name, entry_rows);
        }
        rows += entry_rows;
    }

    Ok(rows)
}

/// `FoodData_Central_csv/food_nutrient.csv` -> `food_nutrient`
pub fn table_name(entry: &str) -> &str {
    let file_name = entry.rsplit('/').next().unwrap_or(entry);
    file_name.strip_suffix(".csv").unwrap_or(file_name)
}
