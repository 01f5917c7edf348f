//! if97: IAPWS-IF97 water and steam properties.
//!
//! Provides:
//! - Region models 1, 2, 2-metastable, 3, 4 and 5 with forward and
//!   backward equations
//! - Boundary curves (saturation line, B23, B2bc, h-s plane curves)
//! - Region selection from (p, T), (p, h), (p, s) and (h, s)
//! - A generic partial-derivative engine over the Quantity enumeration
//! - Transport and optical correlations (viscosity, conductivity,
//!   surface tension, dielectric constant, refractive index)
//!
//! # Architecture
//!
//! All correlations run in one fixed internal unit system (MPa, K,
//! kJ/kg, kJ/(kg*K), kg/m3) the published coefficient tables are
//! calibrated to. The [`steam`] facade is the unit boundary: pressure,
//! temperature and density enter as uom quantities and are converted
//! exactly once.
//!
//! # Example
//!
//! ```no_run
//! use if97::{StateInput, evaluate};
//! use if97_core::units::{k, mpa};
//!
//! let pack = evaluate(StateInput::Pt {
//!     p: mpa(3.0),
//!     t: k(300.0),
//! })
//! .unwrap();
//! println!("v = {} m3/kg in {}", pack.v, pack.region);
//! ```

pub mod boundary;
pub mod constants;
pub mod derivative;
pub mod error;
pub mod quantity;
pub mod region;
pub mod selector;
pub mod steam;
pub mod transport;

// Re-exports for ergonomics
pub use derivative::{partial_derivative, partial_derivative_rho_t};
pub use error::{If97Error, If97Result};
pub use quantity::Quantity;
pub use region::Region;
pub use selector::{region_hs, region_ph, region_ps, region_pt};
pub use steam::{PropertyPack, SpecEnthalpy, SpecEntropy, StateInput, evaluate};
