//! Region equations of the formulation.
//!
//! Regions 1, 2 and 5 are Gibbs-energy formulations in (p, T), region 3
//! is a Helmholtz-energy formulation in (rho, T), region 4 is the
//! two-phase dome. The vapor regions (2, 2-metastable, 5) share the
//! ideal-gas + residual split, factored into [`VaporGibbs`].

pub mod region1;
pub mod region2;
pub mod region3;
pub mod region4;
pub mod region5;

use serde::{Deserialize, Serialize};

use crate::boundary::sqrt_nonneg;
use crate::constants::R;
use crate::error::{If97Error, If97Result};

/// Validity region a state point resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Compressed liquid.
    Region1,
    /// Superheated / sub-critical vapor.
    Region2,
    /// Metastable vapor below the saturation line, 2-metastable
    /// extension. Forward (p, T) evaluation only.
    Region2Meta,
    /// Near-critical fluid, Helmholtz formulation in (rho, T).
    Region3,
    /// Two-phase dome.
    Region4,
    /// High-temperature steam up to 2273.15 K.
    Region5,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Region1 => "region 1",
            Region::Region2 => "region 2",
            Region::Region2Meta => "region 2 (metastable)",
            Region::Region3 => "region 3",
            Region::Region4 => "region 4",
            Region::Region5 => "region 5",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ideal-gas + residual Gibbs energy and derivatives at one state
/// point, in the vapor-region dimensionless form with pi = p / p* and
/// g0_pi = 1/pi.
pub(crate) struct VaporGibbs {
    pub pi: f64,
    pub tau: f64,
    pub g0: f64,
    pub g0_tau: f64,
    pub g0_tautau: f64,
    pub gr: f64,
    pub gr_pi: f64,
    pub gr_pipi: f64,
    pub gr_tau: f64,
    pub gr_tautau: f64,
    pub gr_pitau: f64,
}

impl VaporGibbs {
    /// Specific volume [m3/kg].
    pub fn specific_volume(&self, p_mpa: f64, t_k: f64) -> f64 {
        R * t_k / p_mpa * (1.0 + self.pi * self.gr_pi) / 1000.0
    }

    /// Specific enthalpy [kJ/kg].
    pub fn specific_enthalpy(&self, t_k: f64) -> f64 {
        R * t_k * self.tau * (self.g0_tau + self.gr_tau)
    }

    /// Specific internal energy [kJ/kg].
    pub fn specific_internal_energy(&self, t_k: f64) -> f64 {
        R * t_k * (self.tau * (self.g0_tau + self.gr_tau) - (1.0 + self.pi * self.gr_pi))
    }

    /// Specific entropy [kJ/(kg*K)].
    pub fn specific_entropy(&self) -> f64 {
        R * (self.tau * (self.g0_tau + self.gr_tau) - (self.g0 + self.gr))
    }

    /// Isobaric heat capacity [kJ/(kg*K)].
    pub fn isobaric_heat_capacity(&self) -> f64 {
        -R * self.tau * self.tau * (self.g0_tautau + self.gr_tautau)
    }

    /// Isochoric heat capacity [kJ/(kg*K)].
    pub fn isochoric_heat_capacity(&self) -> If97Result<f64> {
        let denom = 1.0 - self.pi * self.pi * self.gr_pipi;
        if denom == 0.0 {
            return Err(If97Error::NonFinite {
                what: "vapor region cv denominator",
                value: denom,
            });
        }
        let a = 1.0 + self.pi * self.gr_pi - self.tau * self.pi * self.gr_pitau;
        Ok(R * (-self.tau * self.tau * (self.g0_tautau + self.gr_tautau) - a * a / denom))
    }

    /// Speed of sound [m/s].
    pub fn speed_of_sound(&self, t_k: f64) -> If97Result<f64> {
        let a = 1.0 + self.pi * self.gr_pi - self.tau * self.pi * self.gr_pitau;
        let denom = (1.0 - self.pi * self.pi * self.gr_pipi)
            + a * a / (self.tau * self.tau * (self.g0_tautau + self.gr_tautau));
        if denom == 0.0 {
            return Err(If97Error::NonFinite {
                what: "vapor region speed of sound denominator",
                value: denom,
            });
        }
        let num = 1.0 + 2.0 * self.pi * self.gr_pi + (self.pi * self.gr_pi).powi(2);
        sqrt_nonneg(
            1000.0 * R * t_k * num / denom,
            "vapor region speed of sound",
        )
    }

    /// Isobaric cubic expansion coefficient [1/K].
    pub fn expansion_coefficient(&self, t_k: f64) -> f64 {
        let a = 1.0 + self.pi * self.gr_pi - self.tau * self.pi * self.gr_pitau;
        a / (t_k * (1.0 + self.pi * self.gr_pi))
    }

    /// Isothermal compressibility [1/MPa].
    pub fn isothermal_compressibility(&self, p_mpa: f64) -> f64 {
        (1.0 - self.pi * self.pi * self.gr_pipi) / (p_mpa * (1.0 + self.pi * self.gr_pi))
    }
}

pub(crate) fn check_vapor_inputs(p_mpa: f64, t_k: f64, what: &'static str) -> If97Result<()> {
    if !p_mpa.is_finite() || !t_k.is_finite() {
        return Err(If97Error::NonFinite {
            what,
            value: if p_mpa.is_finite() { t_k } else { p_mpa },
        });
    }
    if p_mpa <= 0.0 || t_k <= 0.0 {
        return Err(If97Error::NonFinite {
            what,
            value: if p_mpa <= 0.0 { p_mpa } else { t_k },
        });
    }
    Ok(())
}
