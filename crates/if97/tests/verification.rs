//! Integration checks across the full evaluation pipeline: region
//! selection, forward/backward consistency, boundary continuity and
//! range enforcement.

use if97::{If97Error, Quantity, Region, StateInput, evaluate, region_pt};
use if97_core::units::{k, mpa};

fn assert_rel_close(actual: f64, expected: f64, rel: f64) {
    let err = ((actual - expected) / expected).abs();
    assert!(
        err <= rel,
        "actual={actual}, expected={expected}, rel_err={err}, rel_tol={rel}"
    );
}

#[test]
fn selection_is_total_and_exclusive_over_the_pt_envelope() {
    for &p in &[0.001, 0.1, 1.0, 5.0, 16.0, 25.0, 50.0, 99.0] {
        for &t in &[280.0, 350.0, 450.0, 600.0, 640.0, 700.0, 900.0, 1050.0] {
            let region = region_pt(p, t).unwrap();
            assert_ne!(region, Region::Region4, "p={p} t={t}");
        }
    }
    for &p in &[0.01, 1.0, 10.0, 45.0] {
        for &t in &[1100.0, 1500.0, 2000.0, 2273.15] {
            assert_eq!(region_pt(p, t).unwrap(), Region::Region5, "p={p} t={t}");
        }
    }
}

#[test]
fn ph_and_ps_round_trips_recover_temperature() {
    // Interior points of regions 1, 2, 3 and 5.
    let states = [
        (3.0, 400.0),
        (20.0, 500.0),
        (0.05, 650.0),
        (2.0, 700.0),
        (25.0, 660.0),
        (2.0, 1500.0),
        (20.0, 1800.0),
    ];
    for &(p, t) in &states {
        let pack = evaluate(StateInput::Pt {
            p: mpa(p),
            t: k(t),
        })
        .unwrap();
        let from_h = evaluate(StateInput::Ph {
            p: mpa(p),
            h: pack.h,
        })
        .unwrap();
        assert_eq!(from_h.region, pack.region, "p={p} t={t}");
        assert_rel_close(from_h.t_k, t, 1e-4);

        let from_s = evaluate(StateInput::Ps {
            p: mpa(p),
            s: pack.s,
        })
        .unwrap();
        assert_eq!(from_s.region, pack.region, "p={p} t={t}");
        assert_rel_close(from_s.t_k, t, 1e-4);
    }
}

#[test]
fn hs_round_trips_recover_the_state() {
    let states = [(3.0, 400.0), (0.05, 650.0), (2.0, 700.0), (25.0, 660.0)];
    for &(p, t) in &states {
        let pack = evaluate(StateInput::Pt {
            p: mpa(p),
            t: k(t),
        })
        .unwrap();
        let from_hs = evaluate(StateInput::Hs {
            h: pack.h,
            s: pack.s,
        })
        .unwrap();
        assert_eq!(from_hs.region, pack.region, "p={p} t={t}");
        assert_rel_close(from_hs.p_mpa, p, 3e-4);
        assert_rel_close(from_hs.t_k, t, 1e-4);
    }
}

#[test]
fn saturation_endpoints_match_single_phase_equations() {
    // Region 1 and 2 evaluated exactly on the saturation line agree
    // with the x = 0 and x = 1 endpoints of the dome.
    for &t in &[300.0, 400.0, 500.0, 600.0] {
        let liquid = evaluate(StateInput::Tx { t: k(t), x: 0.0 }).unwrap();
        let vapor = evaluate(StateInput::Tx { t: k(t), x: 1.0 }).unwrap();
        let p = liquid.p_mpa;

        let from_r1 = if97::region::region1::specific_enthalpy(p, t).unwrap();
        assert_rel_close(liquid.h, from_r1, 1e-9);
        let from_r2 = if97::region::region2::specific_enthalpy(p, t).unwrap();
        assert_rel_close(vapor.h, from_r2, 1e-9);
    }
}

#[test]
fn vapour_fraction_round_trip() {
    for &x in &[0.0, 0.25, 0.5, 0.75, 1.0] {
        let mixed = evaluate(StateInput::Px { p: mpa(1.0), x }).unwrap();
        let back = evaluate(StateInput::Hs {
            h: mixed.h,
            s: mixed.s,
        })
        .unwrap();
        // The boundary-curve fits can put the exact x = 0 and x = 1
        // endpoints a hair outside the dome.
        let recovered = match back.region {
            Region::Region4 => back.vapour_fraction.unwrap(),
            Region::Region1 => 0.0,
            Region::Region2 => 1.0,
            other => panic!("x={x} resolved to {other}"),
        };
        assert!((recovered - x).abs() < 1e-5, "x={x} recovered={recovered}");
    }
}

#[test]
fn out_of_range_temperature_names_the_limit() {
    for &p in &[0.1, 1.0, 40.0] {
        match evaluate(StateInput::Pt {
            p: mpa(p),
            t: k(2300.0),
        }) {
            Err(If97Error::OutOfRange {
                quantity,
                value,
                limit,
            }) => {
                assert_eq!(quantity, Quantity::Temperature);
                assert_eq!(value, 2300.0);
                assert_eq!(limit, 2273.15);
            }
            other => panic!("expected a temperature range error, got {other:?}"),
        }
    }
}

#[test]
fn derivative_surface_is_consistent_with_the_pack() {
    let pack = evaluate(StateInput::Pt {
        p: mpa(3.0),
        t: k(500.0),
    })
    .unwrap();
    let dh_dt = pack
        .partial_derivative(
            Quantity::Temperature,
            Quantity::Pressure,
            Quantity::SpecificEnthalpy,
        )
        .unwrap();
    assert_rel_close(dh_dt, pack.cp.unwrap(), 1e-10);
}

#[test]
fn transport_properties_compose_from_the_pack() {
    let pack = evaluate(StateInput::Pt {
        p: mpa(0.1),
        t: k(298.15),
    })
    .unwrap();
    assert_eq!(pack.region, Region::Region1);
    let mu = pack.dynamic_viscosity().unwrap();
    assert!((8e-4..1e-3).contains(&mu), "mu = {mu}");
    let tc = pack.thermal_conductivity().unwrap();
    assert_rel_close(tc, 0.607, 1e-2);
    let eps = pack.dielectric_constant().unwrap();
    assert_rel_close(eps, 78.6, 1e-2);
    let n = pack.refractive_index(0.5893).unwrap();
    assert!((n - 1.333).abs() < 5e-3, "n = {n}");
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn region1_round_trip(p in 1.0_f64..80.0, t in 280.0_f64..600.0) {
            // Stay clearly on the liquid side of the dome.
            prop_assume!(region_pt(p, t).unwrap() == Region::Region1);
            let pack = evaluate(StateInput::Pt { p: mpa(p), t: k(t) }).unwrap();
            let back = evaluate(StateInput::Ph { p: mpa(p), h: pack.h }).unwrap();
            prop_assert!((back.t_k - t).abs() / t < 1e-4);
        }

        #[test]
        fn mixture_enthalpy_is_monotone_in_fraction(p in 0.01_f64..15.0, x in 0.0_f64..1.0) {
            let lo = evaluate(StateInput::Px { p: mpa(p), x: x * 0.5 }).unwrap();
            let hi = evaluate(StateInput::Px { p: mpa(p), x: 0.5 + x * 0.5 }).unwrap();
            prop_assert!(lo.h <= hi.h);
            prop_assert!(lo.s <= hi.s);
        }
    }
}
