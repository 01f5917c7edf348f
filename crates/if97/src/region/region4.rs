//! Region 4: the two-phase dome.
//!
//! The saturation line itself lives in [`crate::boundary`]; this
//! module builds the phase-boundary properties on top of it. Below
//! 16.529 MPa the saturated liquid and vapor states come straight from
//! regions 1 and 2 at the saturation temperature. Above that, both
//! phase boundaries sit inside region 3 and are recovered by inverting
//! the saturation-pressure-from-enthalpy equation with a bounded
//! bisection, then reading region 3 through its (p, h) backward
//! volume equation.

use crate::boundary;
use crate::constants::{P_B13_SAT, P_CRIT, P_MIN};
use crate::error::{If97Error, If97Result};
use crate::quantity::Quantity;
use crate::region::{region1, region2, region3};

// Enthalpy brackets for the region 3 part of the dome. The liquid
// branch tops out at the critical enthalpy, the vapor branch starts
// there.
const H_CRIT: f64 = 2_087.235_001_648_64;
const H_SAT_LIQ_B13: f64 = 1_670.858_218;
const H_SAT_VAP_MAX: f64 = 2_568.592_004;

fn check_pressure(p_mpa: f64) -> If97Result<()> {
    if !p_mpa.is_finite() {
        return Err(If97Error::NonFinite {
            what: "saturation pressure input",
            value: p_mpa,
        });
    }
    if p_mpa < P_MIN {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_MIN));
    }
    if p_mpa > P_CRIT {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_CRIT));
    }
    Ok(())
}

/// Saturated-liquid specific enthalpy [kJ/kg] at pressure p.
pub fn saturated_liquid_enthalpy(p_mpa: f64) -> If97Result<f64> {
    check_pressure(p_mpa)?;
    let ts = boundary::saturation_temperature(p_mpa)?;
    if p_mpa < P_B13_SAT {
        return region1::specific_enthalpy(p_mpa, ts);
    }
    let mut low = H_SAT_LIQ_B13;
    let mut high = H_CRIT;
    let mut h = (low + high) / 2.0;
    for _ in 0..80 {
        h = (low + high) / 2.0;
        let ps = boundary::p3sat_from_enthalpy(h)?;
        if (p_mpa - ps).abs() <= 1e-6 {
            return Ok(h);
        }
        if ps > p_mpa {
            high = h;
        } else {
            low = h;
        }
    }
    Ok(h)
}

/// Saturated-vapor specific enthalpy [kJ/kg] at pressure p.
pub fn saturated_vapor_enthalpy(p_mpa: f64) -> If97Result<f64> {
    check_pressure(p_mpa)?;
    let ts = boundary::saturation_temperature(p_mpa)?;
    if p_mpa < P_B13_SAT {
        return region2::specific_enthalpy(p_mpa, ts);
    }
    // The saturation pressure falls with enthalpy on the vapor branch,
    // so the bisection runs with inverted comparisons.
    let mut low = H_CRIT;
    let mut high = H_SAT_VAP_MAX;
    let mut h = (low + high) / 2.0;
    for _ in 0..120 {
        h = (low + high) / 2.0;
        let ps = boundary::p3sat_from_enthalpy(h)?;
        if (p_mpa - ps).abs() <= 1e-6 {
            return Ok(h);
        }
        if ps < p_mpa {
            high = h;
        } else {
            low = h;
        }
    }
    Ok(h)
}

/// Saturated-liquid specific volume [m3/kg] at pressure p.
pub fn saturated_liquid_volume(p_mpa: f64) -> If97Result<f64> {
    check_pressure(p_mpa)?;
    let ts = boundary::saturation_temperature(p_mpa)?;
    if p_mpa < P_B13_SAT {
        region1::specific_volume(p_mpa, ts)
    } else {
        region3::specific_volume_ph(p_mpa, saturated_liquid_enthalpy(p_mpa)?)
    }
}

/// Saturated-vapor specific volume [m3/kg] at pressure p.
pub fn saturated_vapor_volume(p_mpa: f64) -> If97Result<f64> {
    check_pressure(p_mpa)?;
    let ts = boundary::saturation_temperature(p_mpa)?;
    if p_mpa < P_B13_SAT {
        region2::specific_volume(p_mpa, ts)
    } else {
        region3::specific_volume_ph(p_mpa, saturated_vapor_enthalpy(p_mpa)?)
    }
}

/// Saturated liquid and vapor specific entropies [kJ/(kg*K)] at
/// pressure p, returned as (liquid, vapor).
pub fn saturated_entropies(p_mpa: f64) -> If97Result<(f64, f64)> {
    check_pressure(p_mpa)?;
    let ts = boundary::saturation_temperature(p_mpa)?;
    if p_mpa < P_B13_SAT {
        Ok((
            region1::specific_entropy(p_mpa, ts)?,
            region2::specific_entropy(p_mpa, ts)?,
        ))
    } else {
        let rho_l = 1.0 / region3::specific_volume_ph(p_mpa, saturated_liquid_enthalpy(p_mpa)?)?;
        let rho_v = 1.0 / region3::specific_volume_ph(p_mpa, saturated_vapor_enthalpy(p_mpa)?)?;
        Ok((
            region3::specific_entropy(rho_l, ts)?,
            region3::specific_entropy(rho_v, ts)?,
        ))
    }
}

/// Vapor fraction from pressure and mixture enthalpy. Clamped to
/// [0, 1] at the phase boundaries.
pub fn vapour_fraction_ph(p_mpa: f64, h: f64) -> If97Result<f64> {
    if !h.is_finite() {
        return Err(If97Error::NonFinite {
            what: "mixture enthalpy input",
            value: h,
        });
    }
    let hl = saturated_liquid_enthalpy(p_mpa)?;
    let hv = saturated_vapor_enthalpy(p_mpa)?;
    if h >= hv {
        Ok(1.0)
    } else if h <= hl {
        Ok(0.0)
    } else {
        Ok((h - hl) / (hv - hl))
    }
}

/// Vapor fraction from pressure and mixture entropy. Clamped to
/// [0, 1] at the phase boundaries.
pub fn vapour_fraction_ps(p_mpa: f64, s: f64) -> If97Result<f64> {
    if !s.is_finite() {
        return Err(If97Error::NonFinite {
            what: "mixture entropy input",
            value: s,
        });
    }
    let (sl, sv) = saturated_entropies(p_mpa)?;
    if s >= sv {
        Ok(1.0)
    } else if s <= sl {
        Ok(0.0)
    } else {
        Ok((s - sl) / (sv - sl))
    }
}

/// Vapor fraction from saturation temperature and mixture entropy.
pub fn vapour_fraction_ts(t_k: f64, s: f64) -> If97Result<f64> {
    let p_mpa = boundary::saturation_pressure(t_k)?;
    vapour_fraction_ps(p_mpa, s)
}

fn check_quality(x: f64) -> If97Result<()> {
    if !x.is_finite() {
        return Err(If97Error::NonFinite {
            what: "vapor fraction input",
            value: x,
        });
    }
    if !(0.0..=1.0).contains(&x) {
        return Err(If97Error::out_of_range(
            Quantity::VapourFraction,
            x,
            if x < 0.0 { 0.0 } else { 1.0 },
        ));
    }
    Ok(())
}

/// Mixture specific volume [m3/kg] at pressure and vapor fraction.
pub fn specific_volume_px(p_mpa: f64, x: f64) -> If97Result<f64> {
    check_quality(x)?;
    let vl = saturated_liquid_volume(p_mpa)?;
    let vv = saturated_vapor_volume(p_mpa)?;
    Ok(vl + x * (vv - vl))
}

/// Mixture specific enthalpy [kJ/kg] at pressure and vapor fraction.
pub fn specific_enthalpy_px(p_mpa: f64, x: f64) -> If97Result<f64> {
    check_quality(x)?;
    let hl = saturated_liquid_enthalpy(p_mpa)?;
    let hv = saturated_vapor_enthalpy(p_mpa)?;
    Ok(hl + x * (hv - hl))
}

/// Mixture specific entropy [kJ/(kg*K)] at pressure and vapor
/// fraction.
pub fn specific_entropy_px(p_mpa: f64, x: f64) -> If97Result<f64> {
    check_quality(x)?;
    let (sl, sv) = saturated_entropies(p_mpa)?;
    Ok(sl + x * (sv - sl))
}

/// Mixture specific internal energy [kJ/kg] at pressure and vapor
/// fraction, via u = h - p v.
pub fn specific_internal_energy_px(p_mpa: f64, x: f64) -> If97Result<f64> {
    let h = specific_enthalpy_px(p_mpa, x)?;
    let v = specific_volume_px(p_mpa, x)?;
    Ok(h - p_mpa * v * 1000.0)
}

/// Saturation pressure [MPa] from mixture enthalpy and entropy, by
/// bisection on the mixture-entropy balance. Pressure is only defined
/// here for (h, s) pairs inside the dome.
pub fn pressure_hs(h: f64, s: f64) -> If97Result<f64> {
    if !h.is_finite() || !s.is_finite() {
        return Err(If97Error::NonFinite {
            what: "two-phase h-s input",
            value: if h.is_finite() { s } else { h },
        });
    }
    let mut low = P_MIN;
    let mut high = P_CRIT;
    let mut p = (low + high) / 2.0;
    for _ in 0..120 {
        p = (low + high) / 2.0;
        let x = vapour_fraction_ph(p, h)?;
        let (sl, sv) = saturated_entropies(p)?;
        let s_mix = sl + x * (sv - sl);
        if (s - s_mix).abs() <= 1e-6 && (high - low) <= 1e-7 {
            return Ok(p);
        }
        // Entropy of the mixture at fixed h falls as pressure rises.
        if s_mix < s {
            high = p;
        } else {
            low = p;
        }
    }
    Ok(p)
}

/// Saturation temperature [K] from mixture enthalpy and entropy.
pub fn temperature_hs(h: f64, s: f64) -> If97Result<f64> {
    let p = pressure_hs(h, s)?;
    boundary::saturation_temperature(p)
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
    fn boundary_enthalpies_match_regions_1_and_2_below_16_5_mpa() {
        for &p in &[0.1, 1.0, 10.0] {
            let ts = boundary::saturation_temperature(p).unwrap();
            assert_rel_close(
                saturated_liquid_enthalpy(p).unwrap(),
                region1::specific_enthalpy(p, ts).unwrap(),
                1e-12,
            );
            assert_rel_close(
                saturated_vapor_enthalpy(p).unwrap(),
                region2::specific_enthalpy(p, ts).unwrap(),
                1e-12,
            );
        }
    }

    #[test]
    fn boundary_enthalpies_bracket_the_critical_point() {
        // Inside the region 3 part of the dome the bisection has to
        // keep liquid below and vapor above the critical enthalpy.
        for &p in &[17.0, 20.0, 22.0] {
            let hl = saturated_liquid_enthalpy(p).unwrap();
            let hv = saturated_vapor_enthalpy(p).unwrap();
            assert!(hl < 2_087.235_001_648_64);
            assert!(hv > 2_087.235_001_648_64);
            assert!(hl < hv);
            assert_rel_close(boundary::p3sat_from_enthalpy(hl).unwrap(), p, 1e-5);
            assert_rel_close(boundary::p3sat_from_enthalpy(hv).unwrap(), p, 1e-5);
        }
    }

    #[test]
    fn vapour_fraction_is_linear_in_enthalpy() {
        let p = 1.0;
        let hl = saturated_liquid_enthalpy(p).unwrap();
        let hv = saturated_vapor_enthalpy(p).unwrap();
        assert_eq!(vapour_fraction_ph(p, hl).unwrap(), 0.0);
        assert_eq!(vapour_fraction_ph(p, hv).unwrap(), 1.0);
        let h_mid = 0.5 * (hl + hv);
        assert_rel_close(vapour_fraction_ph(p, h_mid).unwrap(), 0.5, 1e-12);
        // Outside the dome the fraction clamps.
        assert_eq!(vapour_fraction_ph(p, hl - 100.0).unwrap(), 0.0);
        assert_eq!(vapour_fraction_ph(p, hv + 100.0).unwrap(), 1.0);
    }

    #[test]
    fn mixture_properties_interpolate_the_phase_boundaries() {
        let p = 5.0;
        for &x in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let h = specific_enthalpy_px(p, x).unwrap();
            let s = specific_entropy_px(p, x).unwrap();
            assert!((vapour_fraction_ph(p, h).unwrap() - x).abs() < 1e-9);
            assert!((vapour_fraction_ps(p, s).unwrap() - x).abs() < 1e-9);
            let ts = boundary::saturation_temperature(p).unwrap();
            assert!((vapour_fraction_ts(ts, s).unwrap() - x).abs() < 1e-6);
        }
        assert!(specific_volume_px(p, 1.2).is_err());
        assert!(specific_volume_px(p, -0.1).is_err());
    }

    #[test]
    fn temperature_from_enthalpy_entropy_reference_points() {
        assert_rel_close(temperature_hs(1800.0, 5.3).unwrap(), 346.847_549_8, 1e-6);
        assert_rel_close(temperature_hs(2400.0, 6.0).unwrap(), 425.137_330_5, 1e-6);
        assert_rel_close(temperature_hs(2500.0, 5.5).unwrap(), 522.557_901_3, 1e-6);
    }

    #[test]
    fn pressure_from_enthalpy_entropy_round_trips() {
        for &p in &[0.1, 1.0, 10.0] {
            for &x in &[0.2, 0.5, 0.8] {
                let h = specific_enthalpy_px(p, x).unwrap();
                let s = specific_entropy_px(p, x).unwrap();
                assert_rel_close(pressure_hs(h, s).unwrap(), p, 1e-5);
            }
        }
    }

    #[test]
    fn pressure_range_is_enforced() {
        assert!(matches!(
            saturated_liquid_enthalpy(23.0),
            Err(If97Error::OutOfRange { .. })
        ));
        assert!(matches!(
            saturated_vapor_enthalpy(1e-5),
            Err(If97Error::OutOfRange { .. })
        ));
    }
}
