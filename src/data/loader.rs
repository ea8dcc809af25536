/// Table loader. Resolves the history log under a run directory and
/// materialises every header column into a [`ColumnTable`].

use std::path::{Path, PathBuf};

use super::header;
use super::source::{ColumnSource, HistoryFile};
use super::table::ColumnTable;
use crate::error::LoadError;

/// Location of the history log relative to a MESA run directory.
pub const HISTORY_RELATIVE_PATH: &str = "LOGS/history.data";

/// Everything the viewer keeps from a loaded run.
#[derive(Debug, Clone)]
pub struct RunData {
    pub path: PathBuf,
    pub attributes: Vec<(String, String)>,
    pub table: ColumnTable,
}

pub fn history_path(base_dir: &Path) -> PathBuf {
    base_dir.join(HISTORY_RELATIVE_PATH)
}

/// Load the column table of the run in `base_dir`.
pub fn load_table(base_dir: &Path) -> Result<ColumnTable, LoadError> {
    load_run(base_dir).map(|run| run.table)
}

/// Load the run in `base_dir`: header attributes plus the column table.
pub fn load_run(base_dir: &Path) -> Result<RunData, LoadError> {
    let path = history_path(base_dir);
    log::info!("Loading history log: {}", path.display());

    let names = header::read_column_names(&path)?;
    let history = HistoryFile::open(&path)?;
    let table = assemble_table(&names, &history)?;

    log::info!(
        "Loaded {} columns × {} rows from {}",
        table.len(),
        table.row_count().unwrap_or(0),
        path.display()
    );

    Ok(RunData {
        path,
        attributes: history.attributes().to_vec(),
        table,
    })
}

/// Fetch every named column from `source`, in order. Any failed lookup
/// fails the whole table.
pub fn assemble_table<S: ColumnSource + ?Sized>(
    names: &[String],
    source: &S,
) -> Result<ColumnTable, LoadError> {
    let mut table = ColumnTable::new();
    for name in names {
        let values = source.column(name)?;
        table.insert(name, values)?;
    }
    Ok(table)
}
