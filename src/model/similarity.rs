use std::collections::HashMap;

use crate::input::DataLoadError;

/// Square pairwise similarity table, stored row-major with rows and columns
/// in the same identifier order.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn new(ids: Vec<String>, values: Vec<f64>) -> Result<Self, DataLoadError> {
        let n = ids.len();
        if values.len() != n * n {
            return Err(DataLoadError::Schema(format!(
                "similarity matrix has {} values, expected {}x{}",
                values.len(),
                n,
                n
            )));
        }
        let mut index = HashMap::with_capacity(n);
        for (idx, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), idx).is_some() {
                return Err(DataLoadError::DuplicatePlayer(id.clone()));
            }
        }
        Ok(Self { ids, index, values })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn position(&self, player_id: &str) -> Option<usize> {
        self.index.get(player_id).copied()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.index.contains_key(player_id)
    }

    pub fn row(&self, player_id: &str) -> Option<&[f64]> {
        let i = self.position(player_id)?;
        Some(self.row_at(i))
    }

    pub fn row_at(&self, i: usize) -> &[f64] {
        let n = self.ids.len();
        &self.values[i * n..(i + 1) * n]
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.values[i * self.ids.len() + j])
    }

    /// Number of unordered off-diagonal pairs whose two entries differ by more than `tol`.
    pub fn asymmetric_pairs(&self, tol: f64) -> usize {
        let n = self.ids.len();
        let mut count = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = self.values[i * n + j];
                let b = self.values[j * n + i];
                if (a - b).abs() > tol {
                    count += 1;
                }
            }
        }
        count
    }
}
