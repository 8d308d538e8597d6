use std::collections::HashMap;

use crate::input::DataLoadError;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub id: String,
    /// Aligned with `PlayerTable::feature_names`. NaN marks an empty cell.
    pub features: Vec<f64>,
    pub score: f64,
    pub minutes_played: u32,
    pub matches_played: u32,
}

#[derive(Debug, Clone)]
pub struct PlayerTable {
    feature_names: Vec<String>,
    feature_index: HashMap<String, usize>,
    records: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl PlayerTable {
    pub fn new(
        feature_names: Vec<String>,
        records: Vec<PlayerRecord>,
    ) -> Result<Self, DataLoadError> {
        let mut feature_index = HashMap::with_capacity(feature_names.len());
        for (idx, name) in feature_names.iter().enumerate() {
            if feature_index.insert(name.clone(), idx).is_some() {
                return Err(DataLoadError::Schema(format!(
                    "duplicate feature column: {name}"
                )));
            }
        }

        let mut index = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record.features.len() != feature_names.len() {
                return Err(DataLoadError::Schema(format!(
                    "player {} has {} feature values, expected {}",
                    record.id,
                    record.features.len(),
                    feature_names.len()
                )));
            }
            if index.insert(record.id.clone(), idx).is_some() {
                return Err(DataLoadError::DuplicatePlayer(record.id.clone()));
            }
        }

        Ok(Self {
            feature_names,
            feature_index,
            records,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn position(&self, player_id: &str) -> Option<usize> {
        self.index.get(player_id).copied()
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.position(player_id).map(|idx| &self.records[idx])
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.index.contains_key(player_id)
    }

    /// Returns `None` when the column does not exist or the player's cell is empty.
    pub fn feature(&self, record: &PlayerRecord, name: &str) -> Option<f64> {
        let idx = *self.feature_index.get(name)?;
        let value = *record.features.get(idx)?;
        if value.is_nan() { None } else { Some(value) }
    }

    /// Feature mapping of one player in column order.
    pub fn features_of<'a>(
        &'a self,
        record: &'a PlayerRecord,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(record.features.iter().copied())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }
}
