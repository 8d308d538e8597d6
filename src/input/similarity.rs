use std::collections::HashMap;
use std::path::Path;

use crate::input::DataLoadError;
use crate::input::reader::read_table;
use crate::model::SimilarityMatrix;

const TABLE: &str = "similarity table";

/// Reads a labelled square table. The first header cell is a corner label and
/// is ignored. Columns may be listed in any order; the result is stored with
/// columns aligned to row order. Diagonal cells are never read, so they may be
/// empty or non-numeric.
pub fn parse_similarity_matrix(path: &Path) -> Result<SimilarityMatrix, DataLoadError> {
    let raw = read_table(path)?;

    let col_ids = &raw.header[1..];
    if col_ids.is_empty() {
        return Err(DataLoadError::Empty(format!("{TABLE} has no columns")));
    }
    let mut col_index: HashMap<&str, usize> = HashMap::with_capacity(col_ids.len());
    for (idx, id) in col_ids.iter().enumerate() {
        if id.is_empty() {
            return Err(DataLoadError::Parse(format!(
                "{TABLE} header has an empty column label"
            )));
        }
        if col_index.insert(id.as_str(), idx).is_some() {
            return Err(DataLoadError::DuplicatePlayer(id.clone()));
        }
    }

    let n = col_ids.len();
    if raw.rows.len() != n {
        return Err(DataLoadError::Schema(format!(
            "{TABLE} is not square: {} rows, {} columns",
            raw.rows.len(),
            n
        )));
    }

    let row_ids: Vec<String> = raw.rows.iter().map(|(_, f)| f[0].clone()).collect();
    let mut row_to_col = Vec::with_capacity(n);
    for ((line_no, _), id) in raw.rows.iter().zip(&row_ids) {
        let col = col_index.get(id.as_str()).copied().ok_or_else(|| {
            DataLoadError::Schema(format!(
                "{TABLE} line {line_no}: row label '{id}' has no matching column"
            ))
        })?;
        row_to_col.push(col);
    }

    let mut values = vec![0.0f64; n * n];
    for (i, (line_no, fields)) in raw.rows.iter().enumerate() {
        for (j, &col) in row_to_col.iter().enumerate() {
            let cell = &fields[col + 1];
            values[i * n + j] = if i == j {
                cell.parse::<f64>().unwrap_or(f64::NAN)
            } else {
                cell.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        DataLoadError::Parse(format!(
                            "{TABLE} line {line_no}: invalid similarity '{cell}' for ({}, {})",
                            row_ids[i], row_ids[j]
                        ))
                    })?
            };
        }
    }

    SimilarityMatrix::new(row_ids, values)
}
