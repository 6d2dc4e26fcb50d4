//! Cell line screening protocol
//!
//! The fixed reference workflow: fetch a culture plate from storage, add
//! media, pellet, incubate, read absorbance and put the plate back.

use super::step::Protocol;
use crate::plate::PlateId;

/// Cold storage
pub const STORAGE: &str = "Storage";
/// Media and reagent dispensing
pub const LIQUID_HANDLER: &str = "LiquidHandler";
/// Pelleting
pub const CENTRIFUGE: &str = "Centrifuge";
/// Incubation
pub const THERMAL_CYCLER: &str = "ThermalCycler";
/// Absorbance reading
pub const PLATE_READER: &str = "PlateReader";

impl Protocol {
    /// The cell line screening protocol for `plate`
    pub fn cell_screening(plate: impl Into<PlateId>) -> Self {
        let plate = plate.into();

        Protocol::new("Automated Cell Line Screening")
            .transfer(
                "Retrieve plate from cold storage",
                plate.clone(),
                STORAGE,
                LIQUID_HANDLER,
            )
            .process("Add cell culture media and reagents", LIQUID_HANDLER, 3)
            .transfer(
                "Move plate to centrifuge",
                plate.clone(),
                LIQUID_HANDLER,
                CENTRIFUGE,
            )
            .process("Centrifuge to pellet cells", CENTRIFUGE, 2)
            .transfer(
                "Transfer to thermal cycler for incubation",
                plate.clone(),
                CENTRIFUGE,
                THERMAL_CYCLER,
            )
            .process("Incubate at 37°C", THERMAL_CYCLER, 4)
            .transfer(
                "Transfer to plate reader for analysis",
                plate.clone(),
                THERMAL_CYCLER,
                PLATE_READER,
            )
            .process("Read absorbance at 450nm", PLATE_READER, 2)
            .transfer("Return plate to storage", plate, PLATE_READER, STORAGE)
            .return_home("Robot returning to home position")
    }
}
