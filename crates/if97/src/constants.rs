//! Fixed constants of the IF97 formulation.
//!
//! Everything here is calibrated to the internal unit contract:
//! MPa, K, kJ/kg, kJ/(kg*K), kg/m3.

/// Specific gas constant of ordinary water, kJ/(kg*K).
pub const R: f64 = 0.461526;

/// Critical temperature, K.
pub const T_CRIT: f64 = 647.096;
/// Critical pressure, MPa.
pub const P_CRIT: f64 = 22.064;
/// Critical density, kg/m3.
pub const RHO_CRIT: f64 = 322.0;
/// Critical specific entropy, kJ/(kg*K).
pub const S_CRIT: f64 = 4.412_021_482_234_76;

/// Lower temperature limit of the formulation, K.
pub const T_MIN: f64 = 273.15;
/// Boundary temperature between regions 1/3 (and the ceiling of the
/// saturation-curve correlation's region-1/2 endpoints), K.
pub const T_B13: f64 = 623.15;
/// Upper temperature limit of regions 1..3, K.
pub const T_MAX: f64 = 1073.15;
/// Upper temperature limit of region 5, K.
pub const T5_MAX: f64 = 2273.15;

/// Saturation pressure at `T_MIN`, MPa. Global pressure floor.
pub const P_MIN: f64 = 0.000_611_657;
/// Upper pressure limit of regions 1..3, MPa.
pub const P_MAX: f64 = 100.0;
/// Upper pressure limit of region 5, MPa.
pub const P5_MAX: f64 = 50.0;
/// Saturation pressure at `T_B13`, MPa. Above it the two-phase dome
/// borders region 3 instead of regions 1/2.
pub const P_B13_SAT: f64 = 16.529_164_252_604_48;

/// Stable/metastable split pressure for sub-saturated vapor below
/// `T_B13`, MPa.
pub const P_META_MAX: f64 = 10.0;

/// Entropy band edges of the h-s plane selector, kJ/(kg*K).
pub const S_HS_B13_LOW: f64 = 3.397_782_955;
pub const S_HS_SAT1_MAX: f64 = 3.778_281_340;
pub const S_HS_2C3B_MAX: f64 = 5.85;
pub const S_HS_MAX: f64 = 9.155_759_395;
