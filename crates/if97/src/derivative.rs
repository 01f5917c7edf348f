//! Generic partial derivatives over the equilibrium surface.
//!
//! `partial_derivative` computes (dz/dx) at constant y for any triple
//! of quantities via the determinant identity
//!
//!   (dz/dx)_y = (z_p * y_T - z_T * y_p) / (x_p * y_T - x_T * y_p)
//!
//! where each quantity resolves to its closed-form pair of partials
//! with respect to the region's natural variables: (T, p) for the
//! Gibbs regions, (v, T) for region 3. Internal energies are kJ/kg
//! and pressures MPa, so every p*v cross term carries a factor of
//! 1000 kJ/(MPa*m3).

use crate::error::{If97Error, If97Result};
use crate::quantity::Quantity;
use crate::region::{Region, region1, region2, region3, region5};

// kJ per MPa*m3, converts p*v products into specific-energy units.
const PV: f64 = 1000.0;

/// State coefficients of a Gibbs-based region at one point.
struct GibbsState {
    p: f64,
    t: f64,
    v: f64,
    s: f64,
    cp: f64,
    alpha_v: f64,
    kappa_t: f64,
}

/// State coefficients of region 3 at one point.
struct HelmholtzState {
    p: f64,
    t: f64,
    v: f64,
    s: f64,
    cv: f64,
    alpha_p: f64,
    beta_p: f64,
}

impl GibbsState {
    /// (dz/dT at constant p, dz/dp at constant T) for `z`.
    fn pair(&self, z: Quantity) -> If97Result<(f64, f64)> {
        let (p, t, v, s, cp, a, k) = (
            self.p,
            self.t,
            self.v,
            self.s,
            self.cp,
            self.alpha_v,
            self.kappa_t,
        );
        Ok(match z {
            Quantity::Pressure => (0.0, 1.0),
            Quantity::Temperature => (1.0, 0.0),
            Quantity::SpecificVolume => (v * a, -v * k),
            Quantity::Density => (-a / v, k / v),
            Quantity::SpecificInternalEnergy => {
                (cp - PV * p * v * a, PV * v * (p * k - t * a))
            }
            Quantity::SpecificEnthalpy => (cp, PV * v * (1.0 - t * a)),
            Quantity::SpecificEntropy => (cp / t, -PV * v * a),
            Quantity::SpecificGibbsFreeEnergy => (-s, PV * v),
            Quantity::SpecificHelmholtzFreeEnergy => (-s - PV * p * v * a, PV * p * v * k),
            Quantity::VapourFraction | Quantity::Wavelength => {
                return Err(If97Error::Unsupported {
                    what: "derivative of a non-state quantity",
                });
            }
        })
    }
}

impl HelmholtzState {
    /// (dz/dv at constant T, dz/dT at constant v) for `z`.
    fn pair(&self, z: Quantity) -> If97Result<(f64, f64)> {
        let (p, t, v, s, cv, a, b) = (
            self.p,
            self.t,
            self.v,
            self.s,
            self.cv,
            self.alpha_p,
            self.beta_p,
        );
        Ok(match z {
            Quantity::Pressure => (-p * b, p * a),
            Quantity::Temperature => (0.0, 1.0),
            Quantity::SpecificVolume => (1.0, 0.0),
            Quantity::Density => (-1.0 / (v * v), 0.0),
            Quantity::SpecificInternalEnergy => (PV * p * (t * a - 1.0), cv),
            Quantity::SpecificEnthalpy => (PV * p * (t * a - v * b), cv + PV * v * p * a),
            Quantity::SpecificEntropy => (PV * p * a, cv / t),
            Quantity::SpecificGibbsFreeEnergy => (-PV * p * v * b, PV * v * p * a - s),
            Quantity::SpecificHelmholtzFreeEnergy => (-PV * p, -s),
            Quantity::VapourFraction | Quantity::Wavelength => {
                return Err(If97Error::Unsupported {
                    what: "derivative of a non-state quantity",
                });
            }
        })
    }
}

fn gibbs_state(region: Region, p_mpa: f64, t_k: f64) -> If97Result<GibbsState> {
    match region {
        Region::Region1 => {
            let g = region1::gibbs(p_mpa, t_k)?;
            Ok(GibbsState {
                p: p_mpa,
                t: t_k,
                v: region1::specific_volume(p_mpa, t_k)?,
                s: region1::specific_entropy(p_mpa, t_k)?,
                cp: region1::isobaric_heat_capacity(p_mpa, t_k)?,
                alpha_v: (1.0 - g.tau * g.g_pitau / g.g_pi) / t_k,
                kappa_t: -g.pi * g.g_pipi / (p_mpa * g.g_pi),
            })
        }
        Region::Region2 | Region::Region2Meta | Region::Region5 => {
            let g = match region {
                Region::Region2 => region2::gibbs(p_mpa, t_k)?,
                Region::Region2Meta => region2::gibbs_metastable(p_mpa, t_k)?,
                _ => region5::gibbs(p_mpa, t_k)?,
            };
            Ok(GibbsState {
                p: p_mpa,
                t: t_k,
                v: g.specific_volume(p_mpa, t_k),
                s: g.specific_entropy(),
                cp: g.isobaric_heat_capacity(),
                alpha_v: g.expansion_coefficient(t_k),
                kappa_t: g.isothermal_compressibility(p_mpa),
            })
        }
        Region::Region3 | Region::Region4 => Err(If97Error::Unsupported {
            what: "Gibbs derivative pairs outside a Gibbs region",
        }),
    }
}

fn helmholtz_state(rho: f64, t_k: f64) -> If97Result<HelmholtzState> {
    let f = region3::helmholtz(rho, t_k)?;
    Ok(HelmholtzState {
        p: f.pressure(rho, t_k),
        t: t_k,
        v: 1.0 / rho,
        s: f.specific_entropy(),
        cv: f.isochoric_heat_capacity(),
        alpha_p: f.relative_pressure_coefficient(t_k),
        beta_p: f.isothermal_stress_coefficient(rho),
    })
}

fn determinant_ratio(
    zx: (f64, f64),
    zy: (f64, f64),
    zz: (f64, f64),
) -> If97Result<f64> {
    let num = zz.1 * zy.0 - zz.0 * zy.1;
    let den = zx.1 * zy.0 - zx.0 * zy.1;
    let out = num / den;
    if !out.is_finite() {
        return Err(If97Error::NonFinite {
            what: "partial derivative determinant",
            value: out,
        });
    }
    Ok(out)
}

/// (dz/dx) at constant y, at the state (p, T) inside `region`.
///
/// Region 3 is routed through its density-based pairs transparently;
/// the two-phase region has no single-phase derivative surface and is
/// unsupported. A vanishing determinant (degenerate x = y queries,
/// states on a region boundary) surfaces as a non-finite error rather
/// than a NaN result.
pub fn partial_derivative(
    region: Region,
    p_mpa: f64,
    t_k: f64,
    x: Quantity,
    y: Quantity,
    z: Quantity,
) -> If97Result<f64> {
    match region {
        Region::Region4 => Err(If97Error::Unsupported {
            what: "partial derivatives in the two-phase region",
        }),
        Region::Region3 => {
            let rho = region3::density_pt(p_mpa, t_k)?;
            partial_derivative_rho_t(rho, t_k, x, y, z)
        }
        _ => {
            let state = gibbs_state(region, p_mpa, t_k)?;
            let px = state.pair(x)?;
            let py = state.pair(y)?;
            let pz = state.pair(z)?;
            determinant_ratio(px, py, pz)
        }
    }
}

/// (dz/dx) at constant y for a region 3 state given by density and
/// temperature.
pub fn partial_derivative_rho_t(
    rho: f64,
    t_k: f64,
    x: Quantity,
    y: Quantity,
    z: Quantity,
) -> If97Result<f64> {
    let state = helmholtz_state(rho, t_k)?;
    let px = state.pair(x)?;
    let py = state.pair(y)?;
    let pz = state.pair(z)?;
    // The (v, T) pairs feed the same ratio: both determinants flip
    // sign together relative to the (T, p) form, so the quotient is
    // unchanged.
    determinant_ratio(px, py, pz)
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
    fn dh_dt_at_constant_p_is_cp() {
        let (p, t) = (3.0, 300.0);
        let cp = region1::isobaric_heat_capacity(p, t).unwrap();
        let d = partial_derivative(
            Region::Region1,
            p,
            t,
            Quantity::Temperature,
            Quantity::Pressure,
            Quantity::SpecificEnthalpy,
        )
        .unwrap();
        assert_rel_close(d, cp, 1e-12);
    }

    #[test]
    fn dv_dp_at_constant_t_matches_compressibility() {
        let (p, t) = (0.0035, 300.0);
        let v = region2::specific_volume(p, t).unwrap();
        let g = region2::gibbs(p, t).unwrap();
        let kappa = g.isothermal_compressibility(p);
        let d = partial_derivative(
            Region::Region2,
            p,
            t,
            Quantity::Pressure,
            Quantity::Temperature,
            Quantity::SpecificVolume,
        )
        .unwrap();
        assert_rel_close(d, -v * kappa, 1e-12);
    }

    #[test]
    fn derivative_matches_finite_difference_region1() {
        // (du/dp)_T against a central difference of the forward
        // equation.
        let (p, t) = (10.0, 400.0);
        let d = partial_derivative(
            Region::Region1,
            p,
            t,
            Quantity::Pressure,
            Quantity::Temperature,
            Quantity::SpecificInternalEnergy,
        )
        .unwrap();
        let dp = 1e-4;
        let fd = (region1::specific_internal_energy(p + dp, t).unwrap()
            - region1::specific_internal_energy(p - dp, t).unwrap())
            / (2.0 * dp);
        assert_rel_close(d, fd, 1e-5);
    }

    #[test]
    fn derivative_matches_finite_difference_region3() {
        // (dp/dT)_rho against a central difference in region 3.
        let (rho, t) = (500.0, 650.0);
        let d = partial_derivative_rho_t(
            rho,
            t,
            Quantity::Temperature,
            Quantity::Density,
            Quantity::Pressure,
        )
        .unwrap();
        let dt = 1e-3;
        let fd = (region3::pressure(rho, t + dt).unwrap()
            - region3::pressure(rho, t - dt).unwrap())
            / (2.0 * dt);
        assert_rel_close(d, fd, 1e-5);
    }

    #[test]
    fn degenerate_and_two_phase_queries_fail() {
        assert!(matches!(
            partial_derivative(
                Region::Region4,
                1.0,
                453.0,
                Quantity::Pressure,
                Quantity::Temperature,
                Quantity::SpecificEnthalpy,
            ),
            Err(If97Error::Unsupported { .. })
        ));
        // x = y makes the determinant vanish.
        assert!(matches!(
            partial_derivative(
                Region::Region1,
                3.0,
                300.0,
                Quantity::Pressure,
                Quantity::Pressure,
                Quantity::SpecificEnthalpy,
            ),
            Err(If97Error::NonFinite { .. })
        ));
        assert!(partial_derivative(
            Region::Region1,
            3.0,
            300.0,
            Quantity::VapourFraction,
            Quantity::Pressure,
            Quantity::SpecificEnthalpy,
        )
        .is_err());
    }
}
