//! Region selection.
//!
//! Four entry points, one per supported state-variable pair. Every
//! selector checks the global envelope eagerly and reports the
//! offending quantity with the violated limit before any correlation
//! runs. The (p, T) selector never returns region 4: a point exactly
//! on the saturation line resolves to the single-phase side.

use tracing::debug;

use crate::boundary;
use crate::constants::{
    P5_MAX, P_CRIT, P_MAX, P_META_MAX, P_MIN, S_CRIT, S_HS_2C3B_MAX, S_HS_B13_LOW, S_HS_MAX,
    S_HS_SAT1_MAX, T5_MAX, T_B13, T_MAX, T_MIN,
};
use crate::error::{If97Error, If97Result};
use crate::quantity::Quantity;
use crate::region::{Region, region1, region2, region3, region4, region5};

// B23 span in the h-s plane. Between these corners the 2/3 split
// needs the pressure-consistency check against the B23 curve.
const H_HS_B23_MIN: f64 = 2_563.592_004;
const H_HS_B23_MAX: f64 = 2_812.942_061;
const S_HS_B23_MIN: f64 = 5.048_096_828;
const S_HS_B23_MAX: f64 = 5.260_578_707;

fn check_finite(value: f64, what: &'static str) -> If97Result<()> {
    if !value.is_finite() {
        return Err(If97Error::NonFinite { what, value });
    }
    Ok(())
}

fn check_pressure_envelope(p_mpa: f64) -> If97Result<()> {
    check_finite(p_mpa, "selector pressure input")?;
    if p_mpa < P_MIN {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_MIN));
    }
    if p_mpa > P_MAX {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_MAX));
    }
    Ok(())
}

/// Region from pressure [MPa] and temperature [K].
///
/// Above 1073.15 K only region 5 applies and the pressure ceiling
/// drops to 50 MPa; that corner raises a joint violation naming both
/// limits. Below the saturation line the vapor equation switches to
/// its metastable variant at and below 10 MPa, where the stable
/// equation is not valid.
pub fn region_pt(p_mpa: f64, t_k: f64) -> If97Result<Region> {
    check_finite(p_mpa, "selector pressure input")?;
    check_finite(t_k, "selector temperature input")?;
    if t_k < T_MIN {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, T_MIN));
    }
    if t_k > T5_MAX {
        return Err(If97Error::out_of_range(Quantity::Temperature, t_k, T5_MAX));
    }
    if p_mpa < P_MIN {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_MIN));
    }

    if t_k > T_MAX {
        if p_mpa > P5_MAX {
            return Err(If97Error::OutOfRangeJoint {
                quantity: Quantity::Pressure,
                value: p_mpa,
                limit: P5_MAX,
                other_quantity: Quantity::Temperature,
                other_value: t_k,
                other_limit: T_MAX,
            });
        }
        debug!(p_mpa, t_k, "p-T state above 1073.15 K, region 5");
        return Ok(Region::Region5);
    }
    if p_mpa > P_MAX {
        return Err(If97Error::out_of_range(Quantity::Pressure, p_mpa, P_MAX));
    }

    if t_k > T_B13 {
        let pb23 = boundary::b23_pressure(t_k)?;
        let region = if p_mpa > pb23 {
            Region::Region3
        } else {
            Region::Region2
        };
        debug!(p_mpa, t_k, pb23, %region, "p-T state against B23");
        return Ok(region);
    }

    let psat = boundary::saturation_pressure(t_k)?;
    let region = if p_mpa > psat {
        Region::Region1
    } else if p_mpa > P_META_MAX {
        Region::Region2
    } else {
        Region::Region2Meta
    };
    debug!(p_mpa, t_k, psat, %region, "p-T state against saturation line");
    Ok(region)
}

/// Region from pressure [MPa] and specific enthalpy [kJ/kg]. Never
/// returns the metastable variant.
pub fn region_ph(p_mpa: f64, h: f64) -> If97Result<Region> {
    check_pressure_envelope(p_mpa)?;
    check_finite(h, "selector enthalpy input")?;

    let h_min = region1::specific_enthalpy(p_mpa, T_MIN)?;
    if h < h_min {
        return Err(If97Error::out_of_range(
            Quantity::SpecificEnthalpy,
            h,
            h_min,
        ));
    }
    let h_max = if p_mpa <= P5_MAX {
        region5::specific_enthalpy(p_mpa, T5_MAX)?
    } else {
        region2::specific_enthalpy(p_mpa, T_MAX)?
    };
    if h > h_max {
        return Err(If97Error::out_of_range(
            Quantity::SpecificEnthalpy,
            h,
            h_max,
        ));
    }

    if p_mpa <= P_CRIT {
        let hl = region4::saturated_liquid_enthalpy(p_mpa)?;
        let hv = region4::saturated_vapor_enthalpy(p_mpa)?;
        if h >= hl && h <= hv {
            debug!(p_mpa, h, hl, hv, "p-h state inside the dome, region 4");
            return Ok(Region::Region4);
        }
    }
    if let Ok(t) = region1::temperature_ph(p_mpa, h)
        && region_pt(p_mpa, t).ok() == Some(Region::Region1)
    {
        return Ok(Region::Region1);
    }
    if let Ok(t) = region2::temperature_ph(p_mpa, h)
        && matches!(
            region_pt(p_mpa, t).ok(),
            Some(Region::Region2 | Region::Region2Meta)
        )
    {
        return Ok(Region::Region2);
    }
    if let Ok(t) = region3::temperature_ph(p_mpa, h)
        && region_pt(p_mpa, t).ok() == Some(Region::Region3)
    {
        return Ok(Region::Region3);
    }
    if p_mpa <= P5_MAX
        && let Ok(t) = region5::temperature_ph(p_mpa, h)
        && region_pt(p_mpa, t).ok() == Some(Region::Region5)
    {
        return Ok(Region::Region5);
    }
    Err(If97Error::ConvergenceFailed {
        what: "p-h region resolution",
    })
}

/// Region from pressure [MPa] and specific entropy [kJ/(kg*K)].
/// Symmetric to [`region_ph`]. Never returns the metastable variant.
pub fn region_ps(p_mpa: f64, s: f64) -> If97Result<Region> {
    check_pressure_envelope(p_mpa)?;
    check_finite(s, "selector entropy input")?;

    let s_min = region1::specific_entropy(p_mpa, T_MIN)?;
    if s < s_min {
        return Err(If97Error::out_of_range(Quantity::SpecificEntropy, s, s_min));
    }
    let s_max = if p_mpa <= P5_MAX {
        region5::specific_entropy(p_mpa, T5_MAX)?
    } else {
        region2::specific_entropy(p_mpa, T_MAX)?
    };
    if s > s_max {
        return Err(If97Error::out_of_range(Quantity::SpecificEntropy, s, s_max));
    }

    if p_mpa <= P_CRIT {
        let (sl, sv) = region4::saturated_entropies(p_mpa)?;
        if s >= sl && s <= sv {
            debug!(p_mpa, s, sl, sv, "p-s state inside the dome, region 4");
            return Ok(Region::Region4);
        }
    }
    if let Ok(t) = region1::temperature_ps(p_mpa, s)
        && region_pt(p_mpa, t).ok() == Some(Region::Region1)
    {
        return Ok(Region::Region1);
    }
    if let Ok(t) = region2::temperature_ps(p_mpa, s)
        && matches!(
            region_pt(p_mpa, t).ok(),
            Some(Region::Region2 | Region::Region2Meta)
        )
    {
        return Ok(Region::Region2);
    }
    if let Ok(t) = region3::temperature_ps(p_mpa, s)
        && region_pt(p_mpa, t).ok() == Some(Region::Region3)
    {
        return Ok(Region::Region3);
    }
    if p_mpa <= P5_MAX
        && let Ok(t) = region5::temperature_ps(p_mpa, s)
        && region_pt(p_mpa, t).ok() == Some(Region::Region5)
    {
        return Ok(Region::Region5);
    }
    Err(If97Error::ConvergenceFailed {
        what: "p-s region resolution",
    })
}

/// Region from specific enthalpy [kJ/kg] and specific entropy
/// [kJ/(kg*K)].
///
/// Entropy is split into five bands, each delimited against the dome
/// by its own boundary-enthalpy curve. Inside the rectangle spanned
/// by the B23 curve in the h-s plane the 2/3 split additionally
/// checks the backward region 2 pressure against B23. States that
/// would resolve above 1073.15 K are region 5 territory, where no h-s
/// formulation exists.
pub fn region_hs(h: f64, s: f64) -> If97Result<Region> {
    check_finite(h, "selector enthalpy input")?;
    check_finite(s, "selector entropy input")?;

    // Envelope corners: entropy spans region 1 at (p_max, T_min) to
    // region 2 at (p_min, T_max), enthalpy tops out at the same
    // low-pressure high-temperature corner.
    let s_min = region1::specific_entropy(P_MAX, T_MIN)?;
    if s < s_min {
        return Err(If97Error::out_of_range(Quantity::SpecificEntropy, s, s_min));
    }
    let s_max = region2::specific_entropy(P_MIN, T_MAX)?;
    if s > s_max {
        return Err(If97Error::out_of_range(Quantity::SpecificEntropy, s, s_max));
    }
    let h_max = region2::specific_enthalpy(P_MIN, T_MAX)?;
    if h > h_max {
        return Err(If97Error::Unsupported {
            what: "h-s state resolution above 1073.15 K",
        });
    }

    let region = if s <= S_HS_SAT1_MAX {
        // Liquid-side band, regions 1, 3 and the dome.
        if h <= boundary::h1_from_entropy(s)? {
            Region::Region4
        } else if s < S_HS_B13_LOW {
            Region::Region1
        } else if h <= boundary::hb13_from_entropy(s)? {
            Region::Region1
        } else {
            Region::Region3
        }
    } else if s <= S_CRIT {
        if h <= boundary::h3a_from_entropy(s)? {
            Region::Region4
        } else {
            Region::Region3
        }
    } else if s <= S_HS_2C3B_MAX {
        if h <= boundary::h2c3b_from_entropy(s)? {
            Region::Region4
        } else if h <= H_HS_B23_MIN || s <= S_HS_B23_MIN {
            Region::Region3
        } else if h >= H_HS_B23_MAX || s >= S_HS_B23_MAX {
            Region::Region2
        } else {
            // Ambiguous rectangle spanned by B23 in the h-s plane.
            let t = boundary::tb23_from_enthalpy_entropy(h, s)?;
            let p = region2::pressure_hs(h, s)?;
            let pb23 = boundary::b23_pressure(t)?;
            debug!(h, s, p, pb23, "h-s state inside the B23 rectangle");
            if p > pb23 {
                Region::Region3
            } else {
                Region::Region2
            }
        }
    } else if s <= S_HS_MAX {
        if h <= boundary::h2ab_from_entropy(s)? {
            Region::Region4
        } else {
            Region::Region2
        }
    } else {
        // Beyond the saturated-vapor entropy at the triple point the
        // dome is unreachable.
        Region::Region2
    };
    // The low-pressure enthalpy ceiling above only cuts off region-5
    // territory near p_min; at higher pressures region 5 starts at
    // much lower enthalpy. Resolve the tentative region-2 state and
    // reject it when its backward temperature leaves the region.
    if region == Region::Region2 {
        let p = region2::pressure_hs(h, s)?;
        let t = region2::temperature_ph(p, h)?;
        if t > T_MAX {
            debug!(h, s, p, t, "h-s state resolves above 1073.15 K");
            return Err(If97Error::Unsupported {
                what: "h-s state resolution above 1073.15 K",
            });
        }
    }
    debug!(h, s, %region, "h-s state resolved");
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_reference_scenarios() {
        assert_eq!(region_pt(3.0, 300.0).unwrap(), Region::Region1);
        assert_eq!(region_pt(80.0, 300.0).unwrap(), Region::Region1);
        assert_eq!(region_pt(0.0035, 500.0).unwrap(), Region::Region2Meta);
        assert_eq!(region_pt(30.0, 700.0).unwrap(), Region::Region2);
        assert_eq!(region_pt(25.5837018, 650.0).unwrap(), Region::Region3);
        assert_eq!(region_pt(0.5, 1500.0).unwrap(), Region::Region5);
    }

    #[test]
    fn pt_vapor_below_saturation_splits_on_10_mpa() {
        // At 590 K the saturation pressure is about 10.6 MPa, so a
        // vapor state just below it can still sit above 10 MPa.
        let psat = boundary::saturation_pressure(590.0).unwrap();
        assert!(psat > P_META_MAX);
        assert_eq!(region_pt(psat - 0.01, 590.0).unwrap(), Region::Region2);
        assert_eq!(region_pt(5.0, 540.0).unwrap(), Region::Region2Meta);
    }

    #[test]
    fn pt_envelope_violations_name_quantity_and_limit() {
        match region_pt(1.0, 2300.0) {
            Err(If97Error::OutOfRange {
                quantity, limit, ..
            }) => {
                assert_eq!(quantity, Quantity::Temperature);
                assert_eq!(limit, T5_MAX);
            }
            other => panic!("expected temperature range error, got {other:?}"),
        }
        match region_pt(60.0, 1200.0) {
            Err(If97Error::OutOfRangeJoint { limit, .. }) => assert_eq!(limit, P5_MAX),
            other => panic!("expected joint range error, got {other:?}"),
        }
        assert!(region_pt(101.0, 500.0).is_err());
        assert!(region_pt(1.0, 270.0).is_err());
    }

    #[test]
    fn pt_never_returns_region4() {
        for &t in &[300.0, 400.0, 500.0, 600.0] {
            let psat = boundary::saturation_pressure(t).unwrap();
            assert_ne!(region_pt(psat, t).unwrap(), Region::Region4);
        }
    }

    #[test]
    fn ph_classifies_all_five_regions() {
        let h1 = region1::specific_enthalpy(3.0, 400.0).unwrap();
        assert_eq!(region_ph(3.0, h1).unwrap(), Region::Region1);

        let h2 = region2::specific_enthalpy(0.0035, 500.0).unwrap();
        assert_eq!(region_ph(0.0035, h2).unwrap(), Region::Region2);

        let rho = region3::density_pt(25.5837018, 650.0).unwrap();
        let h3 = region3::specific_enthalpy(rho, 650.0).unwrap();
        assert_eq!(region_ph(25.5837018, h3).unwrap(), Region::Region3);

        let h4 = region4::specific_enthalpy_px(1.0, 0.5).unwrap();
        assert_eq!(region_ph(1.0, h4).unwrap(), Region::Region4);

        let h5 = region5::specific_enthalpy(0.5, 1500.0).unwrap();
        assert_eq!(region_ph(0.5, h5).unwrap(), Region::Region5);
    }

    #[test]
    fn ps_classifies_all_five_regions() {
        let s1 = region1::specific_entropy(3.0, 400.0).unwrap();
        assert_eq!(region_ps(3.0, s1).unwrap(), Region::Region1);

        let s2 = region2::specific_entropy(0.0035, 500.0).unwrap();
        assert_eq!(region_ps(0.0035, s2).unwrap(), Region::Region2);

        let rho = region3::density_pt(25.5837018, 650.0).unwrap();
        let s3 = region3::specific_entropy(rho, 650.0).unwrap();
        assert_eq!(region_ps(25.5837018, s3).unwrap(), Region::Region3);

        let s4 = region4::specific_entropy_px(1.0, 0.5).unwrap();
        assert_eq!(region_ps(1.0, s4).unwrap(), Region::Region4);

        let s5 = region5::specific_entropy(0.5, 1500.0).unwrap();
        assert_eq!(region_ps(0.5, s5).unwrap(), Region::Region5);
    }

    #[test]
    fn hs_band_classification() {
        // Compressed liquid, low entropy.
        let h = region1::specific_enthalpy(50.0, 400.0).unwrap();
        let s = region1::specific_entropy(50.0, 400.0).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region1);

        // Two-phase mixture.
        let h = region4::specific_enthalpy_px(1.0, 0.5).unwrap();
        let s = region4::specific_entropy_px(1.0, 0.5).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region4);

        // Near-critical single phase.
        let rho = region3::density_pt(25.5837018, 650.0).unwrap();
        let h = region3::specific_enthalpy(rho, 650.0).unwrap();
        let s = region3::specific_entropy(rho, 650.0).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region3);

        // Superheated steam.
        let h = region2::specific_enthalpy(0.1, 500.0).unwrap();
        let s = region2::specific_entropy(0.1, 500.0).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region2);
    }

    #[test]
    fn hs_b23_rectangle_is_pressure_consistent() {
        // Steam states just either side of B23 a few kelvin above
        // 623.15 K fall in the ambiguous rectangle and must split on
        // the curve.
        let t = 627.0;
        let pb23 = boundary::b23_pressure(t).unwrap();

        let p3 = pb23 + 0.3;
        let rho = region3::density_pt(p3, t).unwrap();
        let h = region3::specific_enthalpy(rho, t).unwrap();
        let s = region3::specific_entropy(rho, t).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region3);

        let p2 = pb23 - 0.3;
        let h = region2::specific_enthalpy(p2, t).unwrap();
        let s = region2::specific_entropy(p2, t).unwrap();
        assert_eq!(region_hs(h, s).unwrap(), Region::Region2);
    }

    #[test]
    fn hs_rejects_region5_territory() {
        let h = region5::specific_enthalpy(0.5, 1500.0).unwrap();
        let s = region5::specific_entropy(0.5, 1500.0).unwrap();
        assert!(matches!(
            region_hs(h, s),
            Err(If97Error::Unsupported { .. })
        ));

        // At high pressure region 5 starts well below the low-pressure
        // enthalpy ceiling; the resolved-temperature guard has to
        // catch it instead.
        let h = region5::specific_enthalpy(40.0, 1100.0).unwrap();
        let s = region5::specific_entropy(40.0, 1100.0).unwrap();
        assert!(h < region2::specific_enthalpy(P_MIN, T_MAX).unwrap());
        assert!(matches!(
            region_hs(h, s),
            Err(If97Error::Unsupported { .. })
        ));
    }
}
