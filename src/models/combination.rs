use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color_math::{hex_to_rgb, rgb_to_hex};
use crate::error::{Result, SwatchError};
use crate::models::color::id_from_clock;

/// One blend in the combination history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRecord {
    /// Clock-derived id, same scheme as `Color::id`.
    pub id: String,
    pub color1: String,
    pub color2: String,
    pub result: String,
    pub name: String,
}

/// Blends colors and keeps the session's combination history, newest first.
///
/// Entries are addressed by position in the current ordering. Positions shift
/// whenever a record is added or removed, so callers resolve them right before
/// use. The `*_by_id` methods address records by their stable id instead.
/// History lives only for the session and is never pruned.
#[derive(Debug, Default, Clone)]
pub struct CombinationEngine {
    history: Vec<CombinationRecord>,
}

/// Channel-wise average of two hex colors, rounding halves up.
pub fn blend(hex_a: &str, hex_b: &str) -> Result<String> {
    let a = hex_to_rgb(hex_a)?;
    let b = hex_to_rgb(hex_b)?;
    let avg = |x: u8, y: u8| (x as i32 + y as i32 + 1) / 2;

    Ok(rgb_to_hex(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b)))
}

impl CombinationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[CombinationRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Blend `hex_a` and `hex_b`, record the blend and return the result.
    pub fn combine(&mut self, hex_a: &str, hex_b: &str) -> Result<String> {
        self.combine_at(hex_a, hex_b, Utc::now())
    }

    pub fn combine_at(&mut self, hex_a: &str, hex_b: &str, now: DateTime<Utc>) -> Result<String> {
        let result = blend(hex_a, hex_b)?;
        self.history.insert(
            0,
            CombinationRecord {
                id: id_from_clock(now),
                color1: hex_a.to_string(),
                color2: hex_b.to_string(),
                result: result.clone(),
                name: String::new(),
            },
        );
        debug!(%result, "combined {} and {}", hex_a, hex_b);
        Ok(result)
    }

    pub fn rename_entry(&mut self, position: usize, name: impl Into<String>) -> Result<()> {
        let len = self.history.len();
        let record = self
            .history
            .get_mut(position)
            .ok_or(SwatchError::StalePosition { position, len })?;
        record.name = name.into();
        Ok(())
    }

    pub fn delete_entry(&mut self, position: usize) -> Result<CombinationRecord> {
        if position >= self.history.len() {
            return Err(SwatchError::StalePosition {
                position,
                len: self.history.len(),
            });
        }
        Ok(self.history.remove(position))
    }

    /// Returns false when no record has this id.
    pub fn rename_by_id(&mut self, id: &str, name: impl Into<String>) -> bool {
        match self.history.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.name = name.into();
                true
            }
            None => {
                debug!(id, "rename skipped, no combination with this id");
                false
            }
        }
    }

    pub fn delete_by_id(&mut self, id: &str) -> Option<CombinationRecord> {
        let position = self.history.iter().position(|record| record.id == id)?;
        Some(self.history.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn black_and_white_rounds_half_up() {
        let mut engine = CombinationEngine::new();
        assert_eq!(engine.combine("#000000", "#ffffff").unwrap(), "#808080");
    }

    #[test]
    fn blending_is_commutative() {
        let samples = ["#000000", "#ffffff", "#123456", "#abcdef", "#ff0001", "#7f7f7f"];
        for a in samples {
            for b in samples {
                assert_eq!(blend(a, b).unwrap(), blend(b, a).unwrap(), "{a} + {b}");
            }
        }
    }

    #[test]
    fn combine_prepends_record_with_empty_name() {
        let mut engine = CombinationEngine::new();
        engine.combine("#ff0000", "#0000ff").unwrap();
        engine.combine("#00ff00", "#000000").unwrap();

        let newest = &engine.history()[0];
        assert_eq!(newest.color1, "#00ff00");
        assert_eq!(newest.color2, "#000000");
        assert_eq!(newest.result, "#008000");
        assert_eq!(newest.name, "");
        assert_eq!(engine.history()[1].result, "#800080");
    }

    #[test]
    fn invalid_input_records_nothing() {
        let mut engine = CombinationEngine::new();
        assert!(engine.combine("#zzzzzz", "#000000").is_err());
        assert!(engine.is_empty());
    }

    #[test]
    fn deleting_head_shifts_positions() {
        let mut engine = CombinationEngine::new();
        engine.combine("#000000", "#000000").unwrap();
        engine.combine("#222222", "#222222").unwrap();
        engine.combine("#444444", "#444444").unwrap();
        let former_second = engine.history()[1].clone();

        engine.delete_entry(0).unwrap();

        assert_eq!(engine.len(), 2);
        assert_eq!(engine.history()[0], former_second);
    }

    #[test]
    fn rename_entry_targets_current_position() {
        let mut engine = CombinationEngine::new();
        engine.combine("#000000", "#ffffff").unwrap();
        engine.combine("#ff0000", "#ffffff").unwrap();

        engine.rename_entry(1, "Mid grey").unwrap();
        assert_eq!(engine.history()[1].name, "Mid grey");
        assert_eq!(engine.history()[0].name, "");
    }

    #[test]
    fn out_of_range_positions_are_reported() {
        let mut engine = CombinationEngine::new();
        engine.combine("#000000", "#ffffff").unwrap();

        assert!(matches!(
            engine.rename_entry(3, "x"),
            Err(SwatchError::StalePosition { position: 3, len: 1 })
        ));
        assert!(engine.delete_entry(1).is_err());
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn stable_ids_survive_position_shifts() {
        let mut engine = CombinationEngine::new();
        let start = Utc::now();
        engine.combine_at("#000000", "#ffffff", start).unwrap();
        engine
            .combine_at("#ff0000", "#00ff00", start + Duration::milliseconds(1))
            .unwrap();
        let older_id = engine.history()[1].id.clone();

        engine
            .combine_at("#0000ff", "#ffffff", start + Duration::milliseconds(2))
            .unwrap();
        assert!(engine.rename_by_id(&older_id, "Grey"));
        assert_eq!(engine.history()[2].name, "Grey");

        let removed = engine.delete_by_id(&older_id).unwrap();
        assert_eq!(removed.result, "#808080");
        assert!(!engine.rename_by_id(&older_id, "gone"));
    }
}
