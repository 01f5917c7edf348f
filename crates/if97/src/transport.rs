//! Transport and optical correlations.
//!
//! Independent closed-form fits over (rho, T) or T alone, outside the
//! free-energy formulation. Each carries its own validity envelope
//! and rejects states outside it before evaluating anything.

use crate::error::{If97Error, If97Result};
use crate::quantity::Quantity;

// Viscosity reducing parameters and coefficient grid.
const VIS_T_STAR: f64 = 647.226;
const VIS_RHO_STAR: f64 = 317.763;
const VIS_SCALE: f64 = 0.000_055_071;
const VIS_H: [[f64; 6]; 7] = [
    [0.513_204_7, 0.320_565_6, 0.0, 0.0, -0.778_256_7, 0.188_544_7],
    [0.215_177_8, 0.731_788_3, 1.241_044, 1.476_783, 0.0, 0.0],
    [-0.281_810_7, -1.070_786, -1.263_184, 0.0, 0.0, 0.0],
    [0.177_806_4, 0.460_504, 0.234_037_9, -0.492_417_9, 0.0, 0.0],
    [-0.041_766_1, 0.0, 0.0, 0.160_043_5, 0.0, 0.0],
    [0.0, -0.015_783_86, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, -0.003_629_481, 0.0, 0.0],
];

fn check_finite3(a: f64, b: f64, c: f64, what: &'static str) -> If97Result<()> {
    for v in [a, b, c] {
        if !v.is_finite() {
            return Err(If97Error::NonFinite { what, value: v });
        }
    }
    Ok(())
}

/// Dynamic viscosity [Pa*s] at one single-phase state. Pressure only
/// enters the validity envelope, the fit itself is over (rho, T).
pub fn dynamic_viscosity(p_mpa: f64, t_k: f64, rho: f64) -> If97Result<f64> {
    check_finite3(p_mpa, t_k, rho, "viscosity input")?;
    if t_k > 1173.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 1173.15));
    }
    if p_mpa > 500.0 {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, 500.0));
    }
    if t_k > 873.15 && p_mpa > 300.0 {
        return Err(If97Error::OutOfRangeJoint {
            quantity: Quantity::Pressure,
            value: p_mpa,
            limit: 300.0,
            other_quantity: Quantity::Temperature,
            other_value: t_k,
            other_limit: 873.15,
        });
    }
    if t_k > 423.15 && p_mpa > 350.0 {
        return Err(If97Error::OutOfRangeJoint {
            quantity: Quantity::Pressure,
            value: p_mpa,
            limit: 350.0,
            other_quantity: Quantity::Temperature,
            other_value: t_k,
            other_limit: 423.15,
        });
    }

    let ts = t_k / VIS_T_STAR;
    let rhos = rho / VIS_RHO_STAR;
    let mu0 =
        ts.sqrt() / (1.0 + 0.978_197 / ts + 0.579_829 / (ts * ts) - 0.202_354 / (ts * ts * ts));
    let a = 1.0 / ts - 1.0;
    let dr = rhos - 1.0;
    let mut sum = 0.0;
    for i in 0..6 {
        let ai = a.powi(i as i32);
        for (j, row) in VIS_H.iter().enumerate() {
            sum += row[i] * ai * dr.powi(j as i32);
        }
    }
    let mu = mu0 * (rhos * sum).exp() * VIS_SCALE;
    if !mu.is_finite() {
        return Err(If97Error::NonFinite {
            what: "dynamic viscosity",
            value: mu,
        });
    }
    Ok(mu)
}

/// Thermal conductivity [W/(m*K)] at one single-phase state. The
/// pressure ceiling steps down with temperature: 100 MPa to 773.15 K,
/// 70 MPa to 923.15 K, 40 MPa beyond.
pub fn thermal_conductivity(p_mpa: f64, t_k: f64, rho: f64) -> If97Result<f64> {
    check_finite3(p_mpa, t_k, rho, "thermal conductivity input")?;
    if t_k < 273.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 273.15));
    }
    let p_ceiling = if t_k < 773.15 {
        100.0
    } else if t_k <= 923.15 {
        70.0
    } else {
        40.0
    };
    if p_mpa > p_ceiling {
        return Err(If97Error::OutOfRangeJoint {
            quantity: Quantity::Pressure,
            value: p_mpa,
            limit: p_ceiling,
            other_quantity: Quantity::Temperature,
            other_value: t_k,
            other_limit: if t_k < 773.15 { 773.15 } else { 923.15 },
        });
    }

    let t = t_k / 647.26;
    let r = rho / 317.7;
    let tc0 = t.sqrt()
        * (0.010_281_1 + 0.029_962_1 * t + 0.015_614_6 * t * t - 0.004_224_64 * t * t * t);
    let tc1 =
        -0.397_07 + 0.400_302 * r + 1.06 * (-0.171_587 * (r + 2.392_19).powi(2)).exp();
    let dt = (t - 1.0).abs() + 0.003_089_76;
    let q = 2.0 + 0.082_299_4 / dt.powf(0.6);
    let s = if t >= 1.0 { 1.0 / dt } else { 10.093_2 / dt.powf(0.6) };
    let tc2 = (0.070_130_9 / t.powi(10) + 0.011_852)
        * r.powf(1.8)
        * (0.642_857 * (1.0 - r.powf(2.8))).exp()
        + 0.001_699_37 * s * r.powf(q) * ((q / (1.0 + q)) * (1.0 - r.powf(1.0 + q))).exp()
        - 1.02 * (-4.117_17 * t.powf(1.5) - 6.179_37 / r.powi(5)).exp();
    let tc = tc0 + tc1 + tc2;
    if !tc.is_finite() {
        return Err(If97Error::NonFinite {
            what: "thermal conductivity",
            value: tc,
        });
    }
    Ok(tc)
}

/// Surface tension [N/m] of the vapor-liquid interface at temperature
/// `t_k`, valid from the triple point to the critical point.
pub fn surface_tension(t_k: f64) -> If97Result<f64> {
    if !t_k.is_finite() {
        return Err(If97Error::NonFinite {
            what: "surface tension temperature",
            value: t_k,
        });
    }
    if t_k < 273.16 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 273.16));
    }
    if t_k > 647.096 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 647.096));
    }
    let tau = 1.0 - t_k / 647.096;
    Ok(0.2358 * tau.powf(1.256) * (1.0 - 0.625 * tau))
}

// Dielectric g-factor fit.
const DIEL_N: [f64; 12] = [
    0.978_224_486_826,
    -0.957_771_379_375,
    0.237_511_794_148,
    0.714_692_244_396,
    -0.298_217_036_956,
    -0.108_863_472_196,
    0.094_932_748_826_4,
    -0.009_804_698_165_09,
    0.000_016_516_763_497,
    0.000_093_735_979_577_2,
    -1.231_792_187_2e-10,
    0.001_960_965_044_26,
];
const DIEL_I: [i32; 11] = [1, 1, 1, 2, 3, 3, 4, 5, 6, 7, 10];
const DIEL_J: [f64; 11] = [0.25, 1.0, 2.5, 1.5, 1.5, 2.5, 2.0, 2.0, 5.0, 0.5, 10.0];

// Physical constants of the dielectric formulation.
const MOLAR_MASS: f64 = 0.018_015_268;
const AVOGADRO: f64 = 6.022_136_7e23;
const BOLTZMANN: f64 = 1.380_658e-23;
const VACUUM_PERMITTIVITY: f64 = 8.854_187_817e-12;
const MEAN_POLARIZABILITY: f64 = 1.636e-40;
const DIPOLE_MOMENT: f64 = 6.138e-30;

/// Static dielectric constant [-] at density `rho` [kg/m3] and
/// temperature `t_k`, via the Harris-Alder g-factor.
pub fn dielectric_constant(rho: f64, t_k: f64) -> If97Result<f64> {
    if !rho.is_finite() || !t_k.is_finite() {
        return Err(If97Error::NonFinite {
            what: "dielectric constant input",
            value: if rho.is_finite() { t_k } else { rho },
        });
    }
    if t_k < 238.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 238.15));
    }
    if t_k > 873.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 873.15));
    }
    if rho <= 0.0 {
        return Err(If97Error::out_of_range(Quantity::Density, rho, 0.0));
    }

    let delta = rho / 322.0;
    let tau = 647.096 / t_k;
    let mut g = 1.0;
    for k in 0..11 {
        g += DIEL_N[k] * delta.powi(DIEL_I[k]) * tau.powf(DIEL_J[k]);
    }
    g += DIEL_N[11] * (rho / 1000.0) * (t_k / 228.0 - 1.0).powf(-1.2);

    let a = AVOGADRO * DIPOLE_MOMENT * DIPOLE_MOMENT * rho * g
        / (MOLAR_MASS * VACUUM_PERMITTIVITY * BOLTZMANN * t_k);
    let b = AVOGADRO * MEAN_POLARIZABILITY * rho / (3.0 * MOLAR_MASS * VACUUM_PERMITTIVITY);
    let disc = 9.0 + 2.0 * a + 18.0 * b + a * a + 10.0 * a * b + 9.0 * b * b;
    let eps = (1.0 + a + 5.0 * b + disc.sqrt()) / (4.0 - 4.0 * b);
    if !eps.is_finite() {
        return Err(If97Error::NonFinite {
            what: "dielectric constant",
            value: eps,
        });
    }
    Ok(eps)
}

// Refractive-index fit coefficients.
const RI_A: [f64; 8] = [
    0.244_257_733,
    9.746_344_76e-3,
    -3.732_349_96e-3,
    2.686_784_72e-4,
    1.589_205_70e-3,
    2.459_342_59e-3,
    0.900_704_920,
    -1.666_262_19e-2,
];
const RI_LAMBDA_UV: f64 = 0.229_202_0;
const RI_LAMBDA_IR: f64 = 5.432_937;

/// Refractive index [-] at density `rho` [kg/m3], temperature `t_k`
/// and vacuum wavelength `lambda_um` [um].
pub fn refractive_index(rho: f64, t_k: f64, lambda_um: f64) -> If97Result<f64> {
    check_finite3(rho, t_k, lambda_um, "refractive index input")?;
    if t_k < 261.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 261.15));
    }
    if t_k > 773.15 {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, 773.15));
    }
    if rho <= 0.0 || rho > 1060.0 {
        return Err(If97Error::out_of_range(
            Quantity::Density,
            rho,
            if rho <= 0.0 { 0.0 } else { 1060.0 },
        ));
    }
    if !(0.2..=1.1).contains(&lambda_um) {
        return Err(If97Error::out_of_range(
            Quantity::Wavelength,
            lambda_um,
            if lambda_um < 0.2 { 0.2 } else { 1.1 },
        ));
    }

    let d = rho / 1000.0;
    let t = t_k / 273.15;
    let l = lambda_um / 0.589;
    let l2 = l * l;
    let rhs = RI_A[0]
        + RI_A[1] * d
        + RI_A[2] * t
        + RI_A[3] * l2 * t
        + RI_A[4] / l2
        + RI_A[5] / (l2 - RI_LAMBDA_UV * RI_LAMBDA_UV)
        + RI_A[6] / (l2 - RI_LAMBDA_IR * RI_LAMBDA_IR)
        + RI_A[7] * d * d;
    let a = rhs * d;
    let n2 = (2.0 * a + 1.0) / (1.0 - a);
    if n2 <= 0.0 || !n2.is_finite() {
        return Err(If97Error::NonFinite {
            what: "refractive index",
            value: n2,
        });
    }
    Ok(n2.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{region1, region2};

    fn assert_rel_close(actual: f64, expected: f64, rel: f64) {
        let err = ((actual - expected) / expected).abs();
        assert!(
            err <= rel,
            "actual={actual}, expected={expected}, rel_err={err}, rel_tol={rel}"
        );
    }

    #[test]
    fn viscosity_of_atmospheric_steam() {
        let (p, t) = (0.1, 373.15);
        let rho = 1.0 / region2::specific_volume(p, t).unwrap();
        assert_rel_close(dynamic_viscosity(p, t, rho).unwrap(), 1.227_04e-5, 1e-4);
    }

    #[test]
    fn conductivity_of_cold_liquid_water() {
        let (p, t) = (0.1, 298.15);
        let rho = 1.0 / region1::specific_volume(p, t).unwrap();
        assert_rel_close(thermal_conductivity(p, t, rho).unwrap(), 0.607_458_162, 1e-4);
    }

    #[test]
    fn surface_tension_at_the_boiling_point() {
        assert_rel_close(
            surface_tension(373.15).unwrap(),
            0.058_911_868_587_664_1,
            1e-9,
        );
        assert!(surface_tension(650.0).is_err());
        assert!(surface_tension(273.0).is_err());
    }

    #[test]
    fn dielectric_constant_of_ambient_water() {
        assert_rel_close(dielectric_constant(997.05, 298.15).unwrap(), 78.590_725_0, 1e-6);
        assert!(dielectric_constant(997.0, 900.0).is_err());
    }

    #[test]
    fn refractive_index_of_ambient_water() {
        // Sodium D line at 20 degC.
        let n = refractive_index(998.2, 293.15, 0.5893).unwrap();
        assert!((n - 1.333).abs() < 5e-3, "n = {n}");
    }

    #[test]
    fn refractive_index_envelope() {
        assert!(matches!(
            refractive_index(998.2, 293.15, 1.5),
            Err(If97Error::OutOfRange {
                quantity: Quantity::Wavelength,
                ..
            })
        ));
        assert!(refractive_index(1100.0, 293.15, 0.5893).is_err());
        assert!(refractive_index(998.2, 800.0, 0.5893).is_err());
    }

    #[test]
    fn viscosity_envelope() {
        assert!(dynamic_viscosity(1.0, 1200.0, 0.2).is_err());
        assert!(matches!(
            dynamic_viscosity(400.0, 500.0, 800.0),
            Err(If97Error::OutOfRangeJoint { .. })
        ));
    }
}
