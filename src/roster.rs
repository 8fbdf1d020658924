use std::io;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader};

/// Errors that keep the roster from loading. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("name list not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse spreadsheet {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet {sheet:?} not found in {} (available: {available})", path.display())]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: String,
    },
    #[error("{} has no worksheets", .0.display())]
    NoSheets(PathBuf),
    #[error("invalid column {0:?} (expected letters like \"A\" or \"AB\")")]
    InvalidColumn(String),
    #[error("{} contains no names", .0.display())]
    Empty(PathBuf),
}

/// Where in the source file the names live.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    /// Worksheet name; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Column letter, `A` when `None`.
    pub column: Option<String>,
}

/// The names loaded at startup. Never empty, every entry trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameList {
    names: Vec<String>,
}

impl NameList {
    /// Build a list from raw entries, trimming each and dropping blanks.
    /// Returns `None` if nothing is left.
    pub fn from_entries<I, S>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = entries
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Spreadsheet,
    Csv,
    Lines,
}

impl SourceKind {
    fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods") => SourceKind::Spreadsheet,
            Some("csv") => SourceKind::Csv,
            _ => SourceKind::Lines,
        }
    }
}

/// Load the roster from `path`.
///
/// Spreadsheets are read through calamine, taking every cell of one column of
/// one worksheet. Anything else is treated as text with one name per line
/// (first field for `.csv`).
pub fn load(path: &Path, selector: &Selector) -> Result<NameList, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let column = match selector.column.as_deref() {
        Some(letters) => column_index(letters)?,
        None => 0,
    };

    let kind = SourceKind::detect(path);
    let entries = match kind {
        SourceKind::Spreadsheet => {
            let range = read_sheet(path, selector.sheet.as_deref())?;
            column_cells(&range, column)
        }
        SourceKind::Csv | SourceKind::Lines => {
            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            text_entries(&content, kind == SourceKind::Csv)
        }
    };

    let list = NameList::from_entries(entries).ok_or_else(|| LoadError::Empty(path.to_path_buf()))?;
    log::info!("loaded {} names from {}", list.len(), path.display());
    Ok(list)
}

fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Range<Data>, LoadError> {
    let spreadsheet_err = |source| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = calamine::open_workbook_auto(path).map_err(spreadsheet_err)?;

    match sheet {
        Some(name) => {
            let names = workbook.sheet_names();
            if !names.iter().any(|n| n == name) {
                return Err(LoadError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                    available: names.join(", "),
                });
            }
            workbook.worksheet_range(name).map_err(spreadsheet_err)
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::NoSheets(path.to_path_buf()))?
            .map_err(spreadsheet_err),
    }
}

/// Convert a column letter (`A`, `b`, `AA`) to a zero-based index.
pub fn column_index(letters: &str) -> Result<u32, LoadError> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(LoadError::InvalidColumn(letters.to_string()));
    }
    let mut index: u32 = 0;
    for ch in trimmed.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(LoadError::InvalidColumn(letters.to_string()));
        }
        let digit = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index * 26 + digit;
    }
    Ok(index - 1)
}

/// Textual values of every cell in `column`, top to bottom. Empty cells are
/// skipped here; blank strings are dropped later by `NameList::from_entries`.
fn column_cells(range: &Range<Data>, column: u32) -> Vec<String> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Vec::new();
    };
    (start.0..=end.0)
        .filter_map(|row| range.get_value((row, column)))
        .filter_map(cell_text)
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_entries(content: &str, first_field: bool) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .map(|line| {
            if first_field {
                line.split(',').next().unwrap_or_default().trim_matches('"')
            } else {
                line
            }
        })
        .map(str::to_string)
        .collect()
}
