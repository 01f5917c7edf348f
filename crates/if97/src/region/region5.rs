//! Region 5: high-temperature steam, 1073.15 K..2273.15 K up to
//! 50 MPa.
//!
//! Same ideal + residual Gibbs split as region 2 with tau = 1000/T,
//! just far fewer terms. No backward polynomials exist for this
//! region, so enthalpy- and entropy-driven queries fall back to a
//! bounded bisection on the forward equations.

use crate::constants::{T5_MAX, T_MAX};
use crate::error::{If97Error, If97Result};
use crate::region::{VaporGibbs, check_vapor_inputs};

const J0: [i32; 6] = [0, 1, -3, -2, -1, 2];
const N0: [f64; 6] = [
    -13.179_983_674_201,
    6.854_084_163_443_4,
    -0.024_805_148_933_466,
    0.369_015_349_803_33,
    -3.116_131_821_392_5,
    -0.329_616_265_389_17,
];

const IR: [i32; 5] = [1, 1, 1, 2, 3];
const JR: [i32; 5] = [0, 1, 3, 9, 3];
const NR: [f64; 5] = [
    -1.256_318_358_959_2e-4,
    2.177_467_871_457_1e-3,
    -0.004_594_282_089_991,
    -3.972_482_835_956_9e-6,
    1.291_922_828_978_4e-7,
];

pub(crate) fn gibbs(p_mpa: f64, t_k: f64) -> If97Result<VaporGibbs> {
    check_vapor_inputs(p_mpa, t_k, "region 5 state")?;
    let pi = p_mpa;
    let tau = 1000.0 / t_k;

    let mut g0 = pi.ln();
    let mut g0_tau = 0.0;
    let mut g0_tautau = 0.0;
    for k in 0..6 {
        let (j, n) = (J0[k], N0[k]);
        g0 += n * tau.powi(j);
        g0_tau += n * (j as f64) * tau.powi(j - 1);
        g0_tautau += n * (j as f64) * ((j - 1) as f64) * tau.powi(j - 2);
    }

    let mut gr = 0.0;
    let mut gr_pi = 0.0;
    let mut gr_pipi = 0.0;
    let mut gr_tau = 0.0;
    let mut gr_tautau = 0.0;
    let mut gr_pitau = 0.0;
    for k in 0..5 {
        let (i, j, n) = (IR[k], JR[k], NR[k]);
        let pii = pi.powi(i);
        let tj = tau.powi(j);
        gr += n * pii * tj;
        gr_pi += n * (i as f64) * pi.powi(i - 1) * tj;
        gr_pipi += n * (i as f64) * ((i - 1) as f64) * pi.powi(i - 2) * tj;
        gr_tau += n * pii * (j as f64) * tau.powi(j - 1);
        gr_tautau += n * pii * (j as f64) * ((j - 1) as f64) * tau.powi(j - 2);
        gr_pitau += n * (i as f64) * pi.powi(i - 1) * (j as f64) * tau.powi(j - 1);
    }

    Ok(VaporGibbs {
        pi,
        tau,
        g0,
        g0_tau,
        g0_tautau,
        gr,
        gr_pi,
        gr_pipi,
        gr_tau,
        gr_tautau,
        gr_pitau,
    })
}

/// Specific volume [m3/kg].
pub fn specific_volume(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    Ok(gibbs(p_mpa, t_k)?.specific_volume(p_mpa, t_k))
}

/// Specific enthalpy [kJ/kg].
pub fn specific_enthalpy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    Ok(gibbs(p_mpa, t_k)?.specific_enthalpy(t_k))
}

/// Specific internal energy [kJ/kg].
pub fn specific_internal_energy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    Ok(gibbs(p_mpa, t_k)?.specific_internal_energy(t_k))
}

/// Specific entropy [kJ/(kg*K)].
pub fn specific_entropy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    Ok(gibbs(p_mpa, t_k)?.specific_entropy())
}

/// Isobaric heat capacity [kJ/(kg*K)].
pub fn isobaric_heat_capacity(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    Ok(gibbs(p_mpa, t_k)?.isobaric_heat_capacity())
}

/// Isochoric heat capacity [kJ/(kg*K)].
pub fn isochoric_heat_capacity(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    gibbs(p_mpa, t_k)?.isochoric_heat_capacity()
}

/// Speed of sound [m/s].
pub fn speed_of_sound(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    gibbs(p_mpa, t_k)?.speed_of_sound(t_k)
}

/// Temperature [K] from pressure and enthalpy, by bisection. Enthalpy
/// is monotone in temperature across the whole region.
pub fn temperature_ph(p_mpa: f64, h: f64) -> If97Result<f64> {
    if !p_mpa.is_finite() || !h.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 5 backward p-h input",
            value: if p_mpa.is_finite() { h } else { p_mpa },
        });
    }
    let mut low = T_MAX;
    let mut high = T5_MAX;
    let mut t = (low + high) / 2.0;
    for _ in 0..80 {
        t = (low + high) / 2.0;
        let hs = specific_enthalpy(p_mpa, t)?;
        if (hs - h).abs() <= 1e-5 {
            return Ok(t);
        }
        if hs > h {
            high = t;
        } else {
            low = t;
        }
    }
    Ok(t)
}

/// Temperature [K] from pressure and entropy, by bisection.
pub fn temperature_ps(p_mpa: f64, s: f64) -> If97Result<f64> {
    if !p_mpa.is_finite() || !s.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 5 backward p-s input",
            value: if p_mpa.is_finite() { s } else { p_mpa },
        });
    }
    let mut low = T_MAX;
    let mut high = T5_MAX;
    let mut t = (low + high) / 2.0;
    for _ in 0..100 {
        t = (low + high) / 2.0;
        let ss = specific_entropy(p_mpa, t)?;
        if (ss - s).abs() <= 1e-5 {
            return Ok(t);
        }
        if ss > s {
            high = t;
        } else {
            low = t;
        }
    }
    Ok(t)
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

    // Forward reference points at (0.5 MPa, 1500 K), (8 MPa, 1500 K)
    // and (8 MPa, 2000 K).
    #[test]
    fn forward_reference_points() {
        let t = [1500.0, 1500.0, 2000.0];
        let p = [0.5, 8.0, 8.0];
        let v = [1.384_553_54, 0.086_515_661_6, 0.115_743_146];
        let h = [5_219.763_32, 5_206.096_34, 6_583.802_91];
        let u = [4_527.486_54, 4_513.971_05, 5_657.857_74];
        let s = [9.654_084_31, 8.365_467_24, 9.156_710_44];
        let cp = [2.616_102_28, 2.644_538_66, 2.853_067_5];
        let w = [917.071_933, 919.708_859, 1_054.358_06];

        for i in 0..3 {
            assert_rel_close(specific_volume(p[i], t[i]).unwrap(), v[i], 1e-8);
            assert_rel_close(specific_enthalpy(p[i], t[i]).unwrap(), h[i], 1e-8);
            assert_rel_close(specific_internal_energy(p[i], t[i]).unwrap(), u[i], 1e-8);
            assert_rel_close(specific_entropy(p[i], t[i]).unwrap(), s[i], 1e-8);
            assert_rel_close(isobaric_heat_capacity(p[i], t[i]).unwrap(), cp[i], 1e-8);
            assert_rel_close(speed_of_sound(p[i], t[i]).unwrap(), w[i], 1e-8);
        }
    }

    #[test]
    fn backward_is_consistent_with_forward() {
        for &(p, t) in &[(0.5, 1500.0), (8.0, 2000.0), (30.0, 1200.0)] {
            let h = specific_enthalpy(p, t).unwrap();
            let s = specific_entropy(p, t).unwrap();
            assert!((temperature_ph(p, h).unwrap() - t).abs() < 1e-3);
            assert!((temperature_ps(p, s).unwrap() - t).abs() < 1e-3);
        }
    }
}
