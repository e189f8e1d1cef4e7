pub mod discovery;
pub mod lines;
pub mod report;

use range_core::{MeasurementError, Unit, UnitSizer};

pub use discovery::discover_units;
pub use lines::LineCounter;

/// Weigh every unit, stopping at the first unit that cannot be measured.
pub fn measure_all(units: &mut [Unit], sizer: &dyn UnitSizer) -> Result<(), MeasurementError> {
    for unit in units.iter_mut() {
        let weight = unit.weigh(sizer)?;
        tracing::debug!(unit = %unit.path.display(), weight, "Measured unit");
    }
    tracing::info!(count = units.len(), "Measured units");
    Ok(())
}
