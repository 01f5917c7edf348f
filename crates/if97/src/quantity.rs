//! Physical-quantity tags.

use serde::{Deserialize, Serialize};

/// Identifies which physical quantity a value, a range violation, or a
/// generic derivative argument refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Pressure,
    Temperature,
    SpecificVolume,
    Density,
    SpecificInternalEnergy,
    SpecificEnthalpy,
    SpecificEntropy,
    SpecificGibbsFreeEnergy,
    SpecificHelmholtzFreeEnergy,
    VapourFraction,
    Wavelength,
}

impl Quantity {
    /// Human-readable label with the internal unit it is expressed in.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Pressure => "pressure [MPa]",
            Quantity::Temperature => "temperature [K]",
            Quantity::SpecificVolume => "specific volume [m3/kg]",
            Quantity::Density => "density [kg/m3]",
            Quantity::SpecificInternalEnergy => "specific internal energy [kJ/kg]",
            Quantity::SpecificEnthalpy => "specific enthalpy [kJ/kg]",
            Quantity::SpecificEntropy => "specific entropy [kJ/(kg K)]",
            Quantity::SpecificGibbsFreeEnergy => "specific Gibbs free energy [kJ/kg]",
            Quantity::SpecificHelmholtzFreeEnergy => "specific Helmholtz free energy [kJ/kg]",
            Quantity::VapourFraction => "vapour fraction [-]",
            Quantity::Wavelength => "wavelength [um]",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
