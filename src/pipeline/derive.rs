//! Derived feature computation
//!
//! The model was trained with two interaction features that do not arrive
//! on the wire; they are recomputed here before encoding. Both require
//! their source fields to be present and numeric.

use super::row::{Cell, FeatureRow};
use super::PipelineError;

/// Derived column names, paired with their source fields.
pub const DERIVED_HP_TORQUE: &str = "HorsePower_Torque";
pub const DERIVED_HP_ACCEL: &str = "HorsePower_Accel_Efficiency";

/// Compute interaction features in place.
///
/// `HorsePower_Torque = HorsePower * Torque` and
/// `HorsePower_Accel_Efficiency = HorsePower * Accel_Efficiency`.
pub fn derive_features(row: &mut FeatureRow) -> Result<(), PipelineError> {
    let horse_power = row.numeric("HorsePower")?;
    let torque = row.numeric("Torque")?;
    let accel_efficiency = row.numeric("Accel_Efficiency")?;

    row.set(DERIVED_HP_TORQUE, Cell::Number(horse_power * torque));
    row.set(DERIVED_HP_ACCEL, Cell::Number(horse_power * accel_efficiency));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_row() -> FeatureRow {
        let mut row = FeatureRow::new();
        row.set("HorsePower", Cell::Number(200.0));
        row.set("Torque", Cell::Number(300.0));
        row.set("Accel_Efficiency", Cell::Number(1.5));
        row
    }

    #[test]
    fn test_derive_products() {
        let mut row = base_row();
        derive_features(&mut row).unwrap();

        assert_eq!(row.get(DERIVED_HP_TORQUE), Some(&Cell::Number(60_000.0)));
        assert_eq!(row.get(DERIVED_HP_ACCEL), Some(&Cell::Number(300.0)));
    }

    #[test]
    fn test_derive_missing_source_fails() {
        let mut row = FeatureRow::new();
        row.set("HorsePower", Cell::Number(200.0));
        row.set("Accel_Efficiency", Cell::Number(1.5));

        let err = derive_features(&mut row).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField(f) if f == "Torque"));
    }

    #[test]
    fn test_derive_non_numeric_source_fails() {
        let mut row = base_row();
        row.set("Torque", Cell::Text("300".to_string()));

        let err = derive_features(&mut row).unwrap_err();
        assert!(matches!(err, PipelineError::NonNumericField(f) if f == "Torque"));
    }
}
