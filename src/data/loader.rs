use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, StringRecord};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal loading problems. Any of these halts the pipeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("file ends before the header line")]
    MissingHeader,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

/// One data row exactly as read, padded to the header width.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based physical line number in the source file.
    pub line: u64,
    pub record: StringRecord,
}

/// Undecoded-by-type contents of the source file.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: StringRecord,
    pub rows: Vec<RawRow>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the volcano export at `path`.
///
/// The export starts with a title line, so the *second* physical line holds
/// the real column names. Text is ISO-8859-1.
pub fn load(path: &Path) -> Result<RawTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Parse an export from any byte source. See [`load`].
pub fn from_reader<R: Read>(rdr: R) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);
    let mut records = reader.byte_records();

    // Title line: discarded.
    records.next().transpose()?.ok_or(LoadError::MissingHeader)?;
    let headers = records
        .next()
        .transpose()?
        .map(|h| decode_latin1(&h))
        .ok_or(LoadError::MissingHeader)?;
    let width = headers.len();

    let mut rows = Vec::new();
    for result in records {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let mut record = decode_latin1(&raw);
        if record.len() > width {
            record.truncate(width);
        }
        while record.len() < width {
            record.push_field("");
        }
        rows.push(RawRow { line, record });
    }

    Ok(RawTable { headers, rows })
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(raw: &ByteRecord) -> StringRecord {
    raw.iter()
        .map(|field| field.iter().map(|&b| char::from(b)).collect::<String>())
        .collect()
}
