//! Public state-evaluation facade.
//!
//! Callers describe a state with one [`StateInput`] variant; pressure,
//! temperature and density cross this boundary as uom quantities and
//! are converted exactly once into the MPa/K/kg-per-m3 system the
//! correlations are calibrated to. Specific energies and entropies
//! stay plain f64 in kJ/kg and kJ/(kg*K).

use serde::Serialize;
use tracing::debug;

use if97_core::units::{Density, Pressure, Temperature, as_kelvin, as_kgm3, as_mpa, k, kgm3, mpa};

use crate::boundary;
use crate::derivative;
use crate::error::{If97Error, If97Result};
use crate::quantity::Quantity;
use crate::region::{Region, region1, region2, region3, region4, region5};
use crate::selector;
use crate::transport;

/// Specific enthalpy [kJ/kg]. Not part of uom's standard set.
pub type SpecEnthalpy = f64;

/// Specific entropy [kJ/(kg*K)]. Not part of uom's standard set.
pub type SpecEntropy = f64;

/// Input pair for evaluating a state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature.
    Pt { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    Ph { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    Ps { p: Pressure, s: SpecEntropy },
    /// Specific enthalpy and specific entropy.
    Hs { h: SpecEnthalpy, s: SpecEntropy },
    /// Density and temperature, region 3 states only.
    RhoT { rho: Density, t: Temperature },
    /// Saturation pressure and vapor fraction.
    Px { p: Pressure, x: f64 },
    /// Saturation temperature and vapor fraction.
    Tx { t: Temperature, x: f64 },
}

/// Every property the formulation yields at one state point, in the
/// internal unit system. Heat capacities, speed of sound and the
/// derivative surface are undefined inside the two-phase dome and
/// absent there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPack {
    /// Region the state resolved to.
    pub region: Region,
    /// Pressure [MPa].
    pub p_mpa: f64,
    /// Temperature [K].
    pub t_k: f64,
    /// Vapor fraction, two-phase states only.
    pub vapour_fraction: Option<f64>,
    /// Specific volume [m3/kg].
    pub v: f64,
    /// Density [kg/m3].
    pub rho: f64,
    /// Specific enthalpy [kJ/kg].
    pub h: f64,
    /// Specific internal energy [kJ/kg].
    pub u: f64,
    /// Specific entropy [kJ/(kg*K)].
    pub s: f64,
    /// Isobaric heat capacity [kJ/(kg*K)].
    pub cp: Option<f64>,
    /// Isochoric heat capacity [kJ/(kg*K)].
    pub cv: Option<f64>,
    /// Speed of sound [m/s].
    pub w: Option<f64>,
}

impl PropertyPack {
    /// Pressure as a uom quantity.
    pub fn pressure(&self) -> Pressure {
        mpa(self.p_mpa)
    }

    /// Temperature as a uom quantity.
    pub fn temperature(&self) -> Temperature {
        k(self.t_k)
    }

    /// Density as a uom quantity.
    pub fn density(&self) -> Density {
        kgm3(self.rho)
    }

    /// Dynamic viscosity [Pa*s] at this state. Single-phase only.
    pub fn dynamic_viscosity(&self) -> If97Result<f64> {
        self.require_single_phase("viscosity of a two-phase mixture")?;
        transport::dynamic_viscosity(self.p_mpa, self.t_k, self.rho)
    }

    /// Thermal conductivity [W/(m*K)] at this state. Single-phase
    /// only.
    pub fn thermal_conductivity(&self) -> If97Result<f64> {
        self.require_single_phase("thermal conductivity of a two-phase mixture")?;
        transport::thermal_conductivity(self.p_mpa, self.t_k, self.rho)
    }

    /// Static dielectric constant [-] at this state. Single-phase
    /// only.
    pub fn dielectric_constant(&self) -> If97Result<f64> {
        self.require_single_phase("dielectric constant of a two-phase mixture")?;
        transport::dielectric_constant(self.rho, self.t_k)
    }

    /// Refractive index [-] at this state and wavelength [um].
    /// Single-phase only.
    pub fn refractive_index(&self, lambda_um: f64) -> If97Result<f64> {
        self.require_single_phase("refractive index of a two-phase mixture")?;
        transport::refractive_index(self.rho, self.t_k, lambda_um)
    }

    /// Prandtl number [-] composed from viscosity, cp and thermal
    /// conductivity. Single-phase only.
    pub fn prandtl_number(&self) -> If97Result<f64> {
        let cp = self.cp.ok_or(If97Error::Unsupported {
            what: "Prandtl number of a two-phase mixture",
        })?;
        let mu = self.dynamic_viscosity()?;
        let lambda = self.thermal_conductivity()?;
        // cp enters in J/(kg*K).
        Ok(mu * cp * 1000.0 / lambda)
    }

    /// (dz/dx) at constant y at this state.
    pub fn partial_derivative(
        &self,
        x: Quantity,
        y: Quantity,
        z: Quantity,
    ) -> If97Result<f64> {
        if self.region == Region::Region3 {
            return derivative::partial_derivative_rho_t(self.rho, self.t_k, x, y, z);
        }
        derivative::partial_derivative(self.region, self.p_mpa, self.t_k, x, y, z)
    }

    fn require_single_phase(&self, what: &'static str) -> If97Result<()> {
        if self.region == Region::Region4 {
            return Err(If97Error::Unsupported { what });
        }
        Ok(())
    }
}

fn pack_gibbs(region: Region, p_mpa: f64, t_k: f64) -> If97Result<PropertyPack> {
    if region == Region::Region1 {
        let v = region1::specific_volume(p_mpa, t_k)?;
        return Ok(PropertyPack {
            region,
            p_mpa,
            t_k,
            vapour_fraction: None,
            v,
            rho: 1.0 / v,
            h: region1::specific_enthalpy(p_mpa, t_k)?,
            u: region1::specific_internal_energy(p_mpa, t_k)?,
            s: region1::specific_entropy(p_mpa, t_k)?,
            cp: Some(region1::isobaric_heat_capacity(p_mpa, t_k)?),
            cv: Some(region1::isochoric_heat_capacity(p_mpa, t_k)?),
            w: Some(region1::speed_of_sound(p_mpa, t_k)?),
        });
    }
    let g = match region {
        Region::Region2 => region2::gibbs(p_mpa, t_k)?,
        Region::Region2Meta => region2::gibbs_metastable(p_mpa, t_k)?,
        Region::Region5 => region5::gibbs(p_mpa, t_k)?,
        _ => {
            return Err(If97Error::Unsupported {
                what: "Gibbs evaluation outside a Gibbs region",
            });
        }
    };
    let v = g.specific_volume(p_mpa, t_k);
    Ok(PropertyPack {
        region,
        p_mpa,
        t_k,
        vapour_fraction: None,
        v,
        rho: 1.0 / v,
        h: g.specific_enthalpy(t_k),
        u: g.specific_internal_energy(t_k),
        s: g.specific_entropy(),
        cp: Some(g.isobaric_heat_capacity()),
        cv: Some(g.isochoric_heat_capacity()?),
        w: Some(g.speed_of_sound(t_k)?),
    })
}

fn pack_region3(rho: f64, t_k: f64) -> If97Result<PropertyPack> {
    let f = region3::helmholtz(rho, t_k)?;
    Ok(PropertyPack {
        region: Region::Region3,
        p_mpa: f.pressure(rho, t_k),
        t_k,
        vapour_fraction: None,
        v: 1.0 / rho,
        rho,
        h: f.specific_enthalpy(t_k),
        u: f.specific_internal_energy(t_k),
        s: f.specific_entropy(),
        cp: Some(f.isobaric_heat_capacity()?),
        cv: Some(f.isochoric_heat_capacity()),
        w: Some(f.speed_of_sound(t_k)?),
    })
}

fn pack_two_phase(p_mpa: f64, x: f64) -> If97Result<PropertyPack> {
    let t_k = boundary::saturation_temperature(p_mpa)?;
    let v = region4::specific_volume_px(p_mpa, x)?;
    Ok(PropertyPack {
        region: Region::Region4,
        p_mpa,
        t_k,
        vapour_fraction: Some(x),
        v,
        rho: 1.0 / v,
        h: region4::specific_enthalpy_px(p_mpa, x)?,
        u: region4::specific_internal_energy_px(p_mpa, x)?,
        s: region4::specific_entropy_px(p_mpa, x)?,
        cp: None,
        cv: None,
        w: None,
    })
}

/// Resolve the region for `input` and evaluate the full property set.
pub fn evaluate(input: StateInput) -> If97Result<PropertyPack> {
    match input {
        StateInput::Pt { p, t } => {
            let (p_mpa, t_k) = (as_mpa(p), as_kelvin(t));
            let region = selector::region_pt(p_mpa, t_k)?;
            debug!(p_mpa, t_k, %region, "evaluating p-T state");
            match region {
                Region::Region3 => pack_region3(region3::density_pt(p_mpa, t_k)?, t_k),
                Region::Region4 => Err(If97Error::Unsupported {
                    what: "two-phase state from (p, T)",
                }),
                _ => pack_gibbs(region, p_mpa, t_k),
            }
        }
        StateInput::Ph { p, h } => {
            let p_mpa = as_mpa(p);
            let region = selector::region_ph(p_mpa, h)?;
            debug!(p_mpa, h, %region, "evaluating p-h state");
            match region {
                Region::Region1 => pack_gibbs(region, p_mpa, region1::temperature_ph(p_mpa, h)?),
                Region::Region2 => pack_gibbs(region, p_mpa, region2::temperature_ph(p_mpa, h)?),
                Region::Region3 => {
                    let t_k = region3::temperature_ph(p_mpa, h)?;
                    let rho = 1.0 / region3::specific_volume_ph(p_mpa, h)?;
                    pack_region3(rho, t_k)
                }
                Region::Region4 => pack_two_phase(p_mpa, region4::vapour_fraction_ph(p_mpa, h)?),
                Region::Region5 => pack_gibbs(region, p_mpa, region5::temperature_ph(p_mpa, h)?),
                Region::Region2Meta => Err(If97Error::Unsupported {
                    what: "enthalpy-driven query on the metastable vapor equation",
                }),
            }
        }
        StateInput::Ps { p, s } => {
            let p_mpa = as_mpa(p);
            let region = selector::region_ps(p_mpa, s)?;
            debug!(p_mpa, s, %region, "evaluating p-s state");
            match region {
                Region::Region1 => pack_gibbs(region, p_mpa, region1::temperature_ps(p_mpa, s)?),
                Region::Region2 => pack_gibbs(region, p_mpa, region2::temperature_ps(p_mpa, s)?),
                Region::Region3 => {
                    let t_k = region3::temperature_ps(p_mpa, s)?;
                    let rho = 1.0 / region3::specific_volume_ps(p_mpa, s)?;
                    pack_region3(rho, t_k)
                }
                Region::Region4 => pack_two_phase(p_mpa, region4::vapour_fraction_ps(p_mpa, s)?),
                Region::Region5 => pack_gibbs(region, p_mpa, region5::temperature_ps(p_mpa, s)?),
                Region::Region2Meta => Err(If97Error::Unsupported {
                    what: "entropy-driven query on the metastable vapor equation",
                }),
            }
        }
        StateInput::Hs { h, s } => {
            let region = selector::region_hs(h, s)?;
            debug!(h, s, %region, "evaluating h-s state");
            match region {
                Region::Region1 => {
                    let p_mpa = region1::pressure_hs(h, s)?;
                    pack_gibbs(region, p_mpa, region1::temperature_ph(p_mpa, h)?)
                }
                Region::Region2 => {
                    let p_mpa = region2::pressure_hs(h, s)?;
                    pack_gibbs(region, p_mpa, region2::temperature_ph(p_mpa, h)?)
                }
                Region::Region3 => {
                    let p_mpa = region3::pressure_hs(h, s)?;
                    let t_k = region3::temperature_ph(p_mpa, h)?;
                    let rho = 1.0 / region3::specific_volume_ph(p_mpa, h)?;
                    pack_region3(rho, t_k)
                }
                Region::Region4 => {
                    let p_mpa = region4::pressure_hs(h, s)?;
                    pack_two_phase(p_mpa, region4::vapour_fraction_ph(p_mpa, h)?)
                }
                Region::Region5 | Region::Region2Meta => Err(If97Error::Unsupported {
                    what: "h-s query outside regions 1-4",
                }),
            }
        }
        StateInput::RhoT { rho, t } => {
            let (rho, t_k) = (as_kgm3(rho), as_kelvin(t));
            let f = region3::helmholtz(rho, t_k)?;
            let p_mpa = f.pressure(rho, t_k);
            if selector::region_pt(p_mpa, t_k)? != Region::Region3 {
                return Err(If97Error::Unsupported {
                    what: "density-temperature states outside region 3",
                });
            }
            pack_region3(rho, t_k)
        }
        StateInput::Px { p, x } => pack_two_phase(as_mpa(p), check_fraction(x)?),
        StateInput::Tx { t, x } => {
            let p_mpa = boundary::saturation_pressure(as_kelvin(t))?;
            pack_two_phase(p_mpa, check_fraction(x)?)
        }
    }
}

fn check_fraction(x: f64) -> If97Result<f64> {
    if !x.is_finite() || !(0.0..=1.0).contains(&x) {
        return Err(If97Error::out_of_range(
            Quantity::VapourFraction,
            x,
            if x < 0.0 { 0.0 } else { 1.0 },
        ));
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rel_close(actual: f64, expected: f64, rel: f64) {
        let err = ((actual - expected) / expected).abs();
        assert!(
            err <= rel,
            "actual={actual}, expected={expected}, rel_err={err}, rel_tol={rel}"
        );
    }

    #[test]
    fn compressed_liquid_reference_point() {
        let pack = evaluate(StateInput::Pt {
            p: mpa(3.0),
            t: k(300.0),
        })
        .unwrap();
        assert_eq!(pack.region, Region::Region1);
        assert_rel_close(pack.v, 0.001_002_15, 1e-5);
        assert_eq!(pack.vapour_fraction, None);
    }

    #[test]
    fn high_pressure_liquid_enthalpy() {
        let pack = evaluate(StateInput::Pt {
            p: mpa(80.0),
            t: k(300.0),
        })
        .unwrap();
        assert_eq!(pack.region, Region::Region1);
        assert_rel_close(pack.h, 184.142_828, 1e-8);
    }

    #[test]
    fn low_pressure_steam_entropy() {
        // Below 10 MPa and below the saturation line the evaluation
        // runs on the metastable extension, which reproduces the
        // stable equation closely at this distance from the dome.
        let pack = evaluate(StateInput::Pt {
            p: mpa(0.0035),
            t: k(300.0),
        })
        .unwrap();
        assert_eq!(pack.region, Region::Region2Meta);
        let stable = region2::specific_entropy(0.0035, 300.0).unwrap();
        assert_rel_close(stable, 8.522_389_67, 1e-8);
        assert_rel_close(pack.s, stable, 1e-3);
    }

    #[test]
    fn ph_round_trip_through_the_pack() {
        let from_pt = evaluate(StateInput::Pt {
            p: mpa(3.0),
            t: k(500.0),
        })
        .unwrap();
        let from_ph = evaluate(StateInput::Ph {
            p: mpa(3.0),
            h: from_pt.h,
        })
        .unwrap();
        assert_eq!(from_ph.region, from_pt.region);
        assert!((from_ph.t_k - 500.0).abs() < 0.05);
    }

    #[test]
    fn two_phase_pack_has_no_caloric_coefficients() {
        let pack = evaluate(StateInput::Px {
            p: mpa(1.0),
            x: 0.5,
        })
        .unwrap();
        assert_eq!(pack.region, Region::Region4);
        assert_eq!(pack.vapour_fraction, Some(0.5));
        assert!(pack.cp.is_none() && pack.cv.is_none() && pack.w.is_none());
        assert!(matches!(
            pack.dynamic_viscosity(),
            Err(If97Error::Unsupported { .. })
        ));
    }

    #[test]
    fn hs_state_above_1073_k_is_unsupported() {
        // High-pressure region-5 coordinates sit below the h-s plane's
        // low-pressure enthalpy ceiling; they must still refuse, not
        // evaluate on the region-2 equation.
        let h = region5::specific_enthalpy(40.0, 1100.0).unwrap();
        let s = region5::specific_entropy(40.0, 1100.0).unwrap();
        assert!(matches!(
            evaluate(StateInput::Hs { h, s }),
            Err(If97Error::Unsupported { .. })
        ));
    }

    #[test]
    fn ambient_water_prandtl_number() {
        let pack = evaluate(StateInput::Pt {
            p: mpa(0.1),
            t: k(298.15),
        })
        .unwrap();
        let pr = pack.prandtl_number().unwrap();
        assert!((5.5..7.0).contains(&pr), "Pr={pr}");
    }

    #[test]
    fn tx_and_px_agree_on_the_saturation_line() {
        let from_t = evaluate(StateInput::Tx {
            t: k(453.035_632),
            x: 0.3,
        })
        .unwrap();
        let from_p = evaluate(StateInput::Px {
            p: mpa(from_t.p_mpa),
            x: 0.3,
        })
        .unwrap();
        assert_rel_close(from_t.h, from_p.h, 1e-9);
    }

    #[test]
    fn rho_t_outside_region3_is_rejected() {
        assert!(
            evaluate(StateInput::RhoT {
                rho: kgm3(997.0),
                t: k(300.0),
            })
            .is_err()
        );
        let pack = evaluate(StateInput::RhoT {
            rho: kgm3(500.0),
            t: k(650.0),
        })
        .unwrap();
        assert_rel_close(pack.p_mpa, 25.583_701_8, 1e-8);
    }

    #[test]
    fn bad_vapor_fraction_is_a_range_error() {
        assert!(matches!(
            evaluate(StateInput::Px {
                p: mpa(1.0),
                x: 1.5,
            }),
            Err(If97Error::OutOfRange {
                quantity: Quantity::VapourFraction,
                ..
            })
        ));
    }
}
