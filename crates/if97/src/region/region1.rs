//! Region 1: compressed liquid, 273.15 K..623.15 K up to 100 MPa.
//!
//! Dimensionless Gibbs free energy gamma(pi, tau) with pi = p/16.53 and
//! tau = 1386/T. All derivatives are evaluated in a single pass and
//! carried in [`Gibbs1`], from which every property follows.

use crate::constants::R;
use crate::error::{If97Error, If97Result};
use crate::boundary::sqrt_nonneg;

const I: [i32; 34] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 8, 8, 21, 23,
    29, 30, 31, 32,
];
const J: [i32; 34] = [
    -2, -1, 0, 1, 2, 3, 4, 5, -9, -7, -1, 0, 1, 3, -3, 0, 1, 3, 17, -4, 0, 6, -5, -2, 10, -8,
    -11, -6, -29, -31, -38, -39, -40, -41,
];
const N: [f64; 34] = [
    0.146_329_712_131_67,
    -0.845_481_871_691_14,
    -3.756_360_367_204,
    3.385_516_916_838_5,
    -0.957_919_633_878_72,
    0.157_720_385_132_28,
    -0.016_616_417_199_501,
    8.121_462_998_356_8e-4,
    2.831_908_012_380_4e-4,
    -6.070_630_156_587_4e-4,
    -0.018_990_068_218_419,
    -0.032_529_748_770_505,
    -0.021_841_717_175_414,
    -5.283_835_796_993e-5,
    -4.718_432_107_326_7e-4,
    -3.000_178_079_302_6e-4,
    4.766_139_390_698_7e-5,
    -4.414_184_533_084_6e-6,
    -7.269_499_629_759_4e-16,
    -3.167_964_484_505_4e-5,
    -2.827_079_798_531_2e-6,
    -8.520_512_812_010_3e-10,
    -2.242_528_190_8e-6,
    -6.517_122_289_560_1e-7,
    -1.434_172_993_792_4e-13,
    -4.051_699_686_011_7e-7,
    -1.273_430_174_164_1e-9,
    -1.742_487_123_063_4e-10,
    -6.876_213_129_553_1e-19,
    1.447_830_782_852_1e-20,
    2.633_578_166_279_5e-23,
    -1.194_762_264_007_1e-23,
    1.822_809_458_140_4e-24,
    -9.353_708_729_245_8e-26,
];

/// Dimensionless Gibbs energy and its derivatives at one state point.
pub(crate) struct Gibbs1 {
    pub pi: f64,
    pub tau: f64,
    pub g: f64,
    pub g_pi: f64,
    pub g_pipi: f64,
    pub g_tau: f64,
    pub g_tautau: f64,
    pub g_pitau: f64,
}

pub(crate) fn gibbs(p_mpa: f64, t_k: f64) -> If97Result<Gibbs1> {
    if !p_mpa.is_finite() || !t_k.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 state",
            value: if p_mpa.is_finite() { t_k } else { p_mpa },
        });
    }
    if p_mpa <= 0.0 || t_k <= 0.0 {
        return Err(If97Error::NonFinite {
            what: "region 1 state",
            value: if p_mpa <= 0.0 { p_mpa } else { t_k },
        });
    }
    let pi = p_mpa / 16.53;
    let tau = 1386.0 / t_k;
    let a = 7.1 - pi;
    let b = tau - 1.222;

    let mut parts = Gibbs1 {
        pi,
        tau,
        g: 0.0,
        g_pi: 0.0,
        g_pipi: 0.0,
        g_tau: 0.0,
        g_tautau: 0.0,
        g_pitau: 0.0,
    };
    for k in 0..34 {
        let (i, j, n) = (I[k], J[k], N[k]);
        let ai = a.powi(i);
        let bj = b.powi(j);
        parts.g += n * ai * bj;
        // d/dpi brings a factor -i from (7.1 - pi).
        parts.g_pi -= n * (i as f64) * a.powi(i - 1) * bj;
        parts.g_pipi += n * (i as f64) * ((i - 1) as f64) * a.powi(i - 2) * bj;
        parts.g_tau += n * ai * (j as f64) * b.powi(j - 1);
        parts.g_tautau += n * ai * (j as f64) * ((j - 1) as f64) * b.powi(j - 2);
        parts.g_pitau -= n * (i as f64) * a.powi(i - 1) * (j as f64) * b.powi(j - 1);
    }
    Ok(parts)
}

/// Specific volume [m3/kg].
pub fn specific_volume(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(R * t_k / p_mpa * g.pi * g.g_pi / 1000.0)
}

/// Specific enthalpy [kJ/kg].
pub fn specific_enthalpy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(R * t_k * g.tau * g.g_tau)
}

/// Specific internal energy [kJ/kg].
pub fn specific_internal_energy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(R * t_k * (g.tau * g.g_tau - g.pi * g.g_pi))
}

/// Specific entropy [kJ/(kg*K)].
pub fn specific_entropy(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(R * (g.tau * g.g_tau - g.g))
}

/// Isobaric heat capacity [kJ/(kg*K)].
pub fn isobaric_heat_capacity(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(-R * g.tau * g.tau * g.g_tautau)
}

/// Isochoric heat capacity [kJ/(kg*K)].
pub fn isochoric_heat_capacity(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    if g.g_pipi == 0.0 {
        return Err(If97Error::NonFinite {
            what: "region 1 gamma_pipi",
            value: g.g_pipi,
        });
    }
    Ok(R * (-g.tau * g.tau * g.g_tautau + (g.g_pi - g.tau * g.g_pitau).powi(2) / g.g_pipi))
}

/// Speed of sound [m/s].
pub fn speed_of_sound(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    let denom =
        (g.g_pi - g.tau * g.g_pitau).powi(2) / (g.tau * g.tau * g.g_tautau) - g.g_pipi;
    if denom == 0.0 {
        return Err(If97Error::NonFinite {
            what: "region 1 speed of sound denominator",
            value: denom,
        });
    }
    sqrt_nonneg(
        1000.0 * R * t_k * g.g_pi * g.g_pi / denom,
        "region 1 speed of sound",
    )
}

/// Isobaric cubic expansion coefficient [1/K].
pub fn expansion_coefficient(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok((1.0 - g.tau * g.g_pitau / g.g_pi) / t_k)
}

/// Isothermal compressibility [1/MPa].
pub fn isothermal_compressibility(p_mpa: f64, t_k: f64) -> If97Result<f64> {
    let g = gibbs(p_mpa, t_k)?;
    Ok(-g.pi * g.g_pipi / (p_mpa * g.g_pi))
}

const T_PH_I: [i32; 20] = [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 2, 2, 3, 3, 4, 5, 6];
const T_PH_J: [i32; 20] = [
    0, 1, 2, 6, 22, 32, 0, 1, 2, 3, 4, 10, 32, 10, 32, 10, 32, 32, 32, 32,
];
const T_PH_N: [f64; 20] = [
    -238.724_899_245_21,
    404.211_886_379_45,
    113.497_468_817_18,
    -5.845_761_604_803_9,
    -1.528_548_241_314e-4,
    -1.086_670_769_537_7e-6,
    -13.391_744_872_602,
    43.211_039_183_559,
    -54.010_067_170_506,
    30.535_892_203_916,
    -6.596_474_942_363_8,
    9.396_540_087_836_3e-3,
    1.157_364_750_534e-7,
    -2.585_864_128_207_3e-5,
    -4.064_436_308_479_9e-9,
    6.645_618_619_163_5e-8,
    8.067_073_410_302_7e-11,
    -9.347_777_121_394_7e-13,
    5.826_544_202_060_1e-15,
    -1.502_018_595_350_3e-17,
];

/// Backward temperature [K] from pressure and enthalpy.
pub fn temperature_ph(p_mpa: f64, h: f64) -> If97Result<f64> {
    if !p_mpa.is_finite() || !h.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward p-h input",
            value: if p_mpa.is_finite() { h } else { p_mpa },
        });
    }
    let eta = h / 2500.0;
    let mut t = 0.0;
    for k in 0..20 {
        t += T_PH_N[k] * p_mpa.powi(T_PH_I[k]) * (eta + 1.0).powi(T_PH_J[k]);
    }
    if !t.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward temperature",
            value: t,
        });
    }
    Ok(t)
}

const T_PS_I: [i32; 20] = [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 4];
const T_PS_J: [i32; 20] = [
    0, 1, 2, 3, 11, 31, 0, 1, 2, 3, 12, 31, 0, 1, 2, 9, 31, 10, 32, 32,
];
const T_PS_N: [f64; 20] = [
    174.782_680_583_07,
    34.806_930_892_873,
    6.529_258_497_845_5,
    0.330_399_817_754_89,
    -1.928_138_292_319_6e-7,
    -2.490_919_724_457_3e-23,
    -0.261_076_364_893_32,
    0.225_929_659_815_86,
    -0.064_256_463_395_226,
    7.887_628_927_052_6e-3,
    3.567_211_060_736_6e-10,
    1.733_249_699_489_5e-24,
    5.660_890_065_483_7e-4,
    -3.263_548_313_971_7e-4,
    4.477_828_669_063_2e-5,
    -5.132_215_690_850_7e-10,
    -4.252_265_704_220_7e-26,
    2.640_044_136_068_9e-13,
    7.812_460_045_972_3e-29,
    -3.073_219_990_366_8e-31,
];

/// Backward temperature [K] from pressure and entropy.
pub fn temperature_ps(p_mpa: f64, s: f64) -> If97Result<f64> {
    if !p_mpa.is_finite() || !s.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward p-s input",
            value: if p_mpa.is_finite() { s } else { p_mpa },
        });
    }
    let mut t = 0.0;
    for k in 0..20 {
        t += T_PS_N[k] * p_mpa.powi(T_PS_I[k]) * (s + 2.0).powi(T_PS_J[k]);
    }
    if !t.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward temperature",
            value: t,
        });
    }
    Ok(t)
}

const P_HS_I: [i32; 19] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 4, 4, 5];
const P_HS_J: [i32; 19] = [0, 1, 2, 4, 5, 6, 8, 14, 0, 1, 4, 6, 0, 1, 10, 4, 1, 4, 0];
const P_HS_N: [f64; 19] = [
    -0.691_997_014_660_582,
    -18.361_254_878_756,
    -9.283_324_092_973_35,
    65.963_956_990_990_6,
    -16.206_038_891_202_4,
    450.620_017_338_667,
    854.680_678_224_17,
    6_075.232_140_011_62,
    32.648_768_262_185_6,
    -26.940_884_458_293_1,
    -319.947_848_334_3,
    -928.354_307_043_32,
    30.363_453_745_524_9,
    -65.054_042_244_414_6,
    -4_309.913_165_161_3,
    -747.512_324_096_068,
    730.000_345_529_245,
    1_142.840_325_690_21,
    -436.407_041_874_559,
];

/// Backward pressure [MPa] from enthalpy and entropy.
pub fn pressure_hs(h: f64, s: f64) -> If97Result<f64> {
    if !h.is_finite() || !s.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward h-s input",
            value: if h.is_finite() { s } else { h },
        });
    }
    let eta = h / 3400.0;
    let sigma = s / 7.6;
    let mut p = 0.0;
    for k in 0..19 {
        p += P_HS_N[k] * (eta + 0.05).powi(P_HS_I[k]) * (sigma + 0.05).powi(P_HS_J[k]);
    }
    let p = p * 100.0;
    if !p.is_finite() {
        return Err(If97Error::NonFinite {
            what: "region 1 backward pressure",
            value: p,
        });
    }
    Ok(p)
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

    // Forward reference points at (3 MPa, 300 K), (80 MPa, 300 K) and
    // (3 MPa, 500 K).
    #[test]
    fn forward_reference_points() {
        assert_rel_close(specific_volume(3.0, 300.0).unwrap(), 0.001_002_151_68, 1e-8);
        assert_rel_close(specific_volume(80.0, 300.0).unwrap(), 0.000_971_180_894, 1e-8);
        assert_rel_close(specific_volume(3.0, 500.0).unwrap(), 0.001_202_418, 1e-7);

        assert_rel_close(specific_enthalpy(3.0, 300.0).unwrap(), 115.331_273, 1e-8);
        assert_rel_close(specific_enthalpy(80.0, 300.0).unwrap(), 184.142_828, 1e-8);
        assert_rel_close(specific_enthalpy(3.0, 500.0).unwrap(), 975.542_239, 1e-8);

        assert_rel_close(
            specific_internal_energy(3.0, 300.0).unwrap(),
            112.324_818,
            1e-8,
        );
        assert_rel_close(
            specific_internal_energy(80.0, 300.0).unwrap(),
            106.448_356,
            1e-8,
        );
        assert_rel_close(
            specific_internal_energy(3.0, 500.0).unwrap(),
            971.934_985,
            1e-8,
        );

        assert_rel_close(specific_entropy(3.0, 300.0).unwrap(), 0.392_294_792, 1e-8);
        assert_rel_close(specific_entropy(80.0, 300.0).unwrap(), 0.368_563_852, 1e-8);
        assert_rel_close(specific_entropy(3.0, 500.0).unwrap(), 2.580_419_12, 1e-8);

        assert_rel_close(
            isobaric_heat_capacity(3.0, 300.0).unwrap(),
            4.173_012_18,
            1e-8,
        );
        assert_rel_close(
            isobaric_heat_capacity(80.0, 300.0).unwrap(),
            4.010_089_87,
            1e-8,
        );
        assert_rel_close(
            isobaric_heat_capacity(3.0, 500.0).unwrap(),
            4.655_806_82,
            1e-8,
        );

        assert_rel_close(speed_of_sound(3.0, 300.0).unwrap(), 1_507.739_21, 1e-8);
        assert_rel_close(speed_of_sound(80.0, 300.0).unwrap(), 1_634.690_54, 1e-8);
        assert_rel_close(speed_of_sound(3.0, 500.0).unwrap(), 1_240.713_37, 1e-8);
    }

    #[test]
    fn backward_temperature_ph() {
        assert_rel_close(temperature_ph(3.0, 500.0).unwrap(), 391.798_509, 1e-8);
        assert_rel_close(temperature_ph(80.0, 500.0).unwrap(), 378.108_626, 1e-8);
        assert_rel_close(temperature_ph(80.0, 1500.0).unwrap(), 611.041_229, 1e-8);
    }

    #[test]
    fn backward_temperature_ps() {
        assert_rel_close(temperature_ps(3.0, 0.5).unwrap(), 307.842_258, 1e-8);
        assert_rel_close(temperature_ps(80.0, 0.5).unwrap(), 309.979_785, 1e-8);
        assert_rel_close(temperature_ps(80.0, 3.0).unwrap(), 565.899_909, 1e-8);
    }

    #[test]
    fn backward_pressure_hs() {
        assert_rel_close(pressure_hs(0.001, 0.0).unwrap(), 9.800_980_612e-4, 1e-8);
        assert_rel_close(pressure_hs(90.0, 0.0).unwrap(), 91.929_547_272, 1e-8);
        assert_rel_close(pressure_hs(1500.0, 3.4).unwrap(), 58.682_944_23, 1e-8);
    }

    #[test]
    fn backward_is_consistent_with_forward() {
        for &(p, t) in &[(3.0, 300.0), (30.0, 400.0), (80.0, 600.0)] {
            let h = specific_enthalpy(p, t).unwrap();
            let s = specific_entropy(p, t).unwrap();
            assert!((temperature_ph(p, h).unwrap() - t).abs() < 0.03);
            assert!((temperature_ps(p, s).unwrap() - t).abs() < 0.03);
            assert!((pressure_hs(h, s).unwrap() - p).abs() / p < 1e-3);
        }
    }
}
