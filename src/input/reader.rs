use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use serde::Deserialize;

use crate::input::DataLoadError;

/// Name pyarrow gives an unnamed dataframe index.
const UNNAMED_INDEX: &str = "__index_level_0__";

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Header plus data rows of a table file. Each row keeps its 1-based line
/// (TSV) or row (parquet) number for error messages.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

/// Reads `.parquet` files as dataframe exports and everything else as
/// tab-separated text (optionally `.gz`).
pub fn read_table(path: &Path) -> Result<RawTable, DataLoadError> {
    if path.extension().is_some_and(|ext| ext == "parquet") {
        read_parquet(path)
    } else {
        read_tsv(path)
    }
}

pub fn read_tsv(path: &Path) -> Result<RawTable, DataLoadError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut line_no = 0usize;
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        // Only strip the line terminator; trailing tabs are empty cells.
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split('\t').map(|s| s.trim().to_string()).collect();
        match &header {
            None => header = Some(fields),
            Some(cols) => {
                if fields.len() != cols.len() {
                    return Err(DataLoadError::Parse(format!(
                        "{} line {} has {} fields, header has {}",
                        path.display(),
                        line_no,
                        fields.len(),
                        cols.len()
                    )));
                }
                rows.push((line_no, fields));
            }
        }
    }

    let header = header.ok_or_else(|| DataLoadError::Empty(path.display().to_string()))?;
    if rows.is_empty() {
        return Err(DataLoadError::Empty(path.display().to_string()));
    }

    Ok(RawTable { header, rows })
}

#[derive(Debug, Default, Deserialize)]
struct PandasMetadata {
    #[serde(default)]
    index_columns: Vec<serde_json::Value>,
}

/// Index columns stored as physical columns. Range indexes are described in
/// metadata only and are skipped.
fn pandas_index_columns(reader: &SerializedFileReader<File>, header: &[String]) -> Vec<String> {
    let pandas = reader
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .and_then(|kv| kv.iter().find(|entry| entry.key == "pandas"))
        .and_then(|entry| entry.value.as_deref());

    let meta = match pandas.map(serde_json::from_str::<PandasMetadata>) {
        Some(Ok(meta)) => meta,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "ignoring unreadable pandas metadata");
            PandasMetadata::default()
        }
        None => PandasMetadata::default(),
    };

    let mut index: Vec<String> = meta
        .index_columns
        .iter()
        .filter_map(|v| v.as_str())
        .filter(|name| header.iter().any(|h| h.as_str() == *name))
        .map(str::to_string)
        .collect();
    if index.is_empty() && header.iter().any(|h| h == UNNAMED_INDEX) {
        index.push(UNNAMED_INDEX.to_string());
    }
    index
}

fn field_text(field: &Field) -> String {
    match field {
        Field::Null => String::new(),
        Field::Str(s) => s.clone(),
        Field::Double(v) => v.to_string(),
        Field::Float(v) => v.to_string(),
        Field::Long(v) => v.to_string(),
        Field::Int(v) => v.to_string(),
        Field::Short(v) => v.to_string(),
        Field::Byte(v) => v.to_string(),
        Field::ULong(v) => v.to_string(),
        Field::UInt(v) => v.to_string(),
        Field::UShort(v) => v.to_string(),
        Field::UByte(v) => v.to_string(),
        Field::Bool(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// Reads a flat parquet file into the same shape as [`read_tsv`]. Index
/// columns written by pandas are moved to the front (the way
/// `reset_index()` exposes them), and an unnamed index is called `index`.
pub fn read_parquet(path: &Path) -> Result<RawTable, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::MissingInput(path.display().to_string()));
    }
    let reader = SerializedFileReader::new(File::open(path)?)?;

    let header: Vec<String> = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .root_schema()
        .get_fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    if header.is_empty() {
        return Err(DataLoadError::Empty(path.display().to_string()));
    }

    let index = pandas_index_columns(&reader, &header);
    let mut order: Vec<usize> = index
        .iter()
        .filter_map(|name| header.iter().position(|h| h == name))
        .collect();
    let rest: Vec<usize> = (0..header.len()).filter(|idx| !order.contains(idx)).collect();
    order.extend(rest);

    let mut rows = Vec::new();
    for (row_idx, row) in reader.get_row_iter(None)?.enumerate() {
        let row = row?;
        let cells: Vec<String> = row
            .get_column_iter()
            .map(|(_, field)| field_text(field).trim().to_string())
            .collect();
        if cells.len() != header.len() {
            return Err(DataLoadError::Parse(format!(
                "{} row {} has {} fields, schema has {}",
                path.display(),
                row_idx + 1,
                cells.len(),
                header.len()
            )));
        }
        rows.push((row_idx + 1, order.iter().map(|&idx| cells[idx].clone()).collect()));
    }
    if rows.is_empty() {
        return Err(DataLoadError::Empty(path.display().to_string()));
    }

    let header = order
        .iter()
        .map(|&idx| {
            if header[idx] == UNNAMED_INDEX {
                "index".to_string()
            } else {
                header[idx].clone()
            }
        })
        .collect();
    tracing::debug!(path = %path.display(), rows = rows.len(), index = ?index, "read parquet table");

    Ok(RawTable { header, rows })
}

/// Parses a non-negative whole number, accepting float spellings like `1234.0`
/// that dataframe exports produce for integer columns.
pub fn parse_count(raw: &str) -> Option<u32> {
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}
