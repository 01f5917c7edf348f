// if97-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn mpa(v: f64) -> Pressure {
    use uom::si::pressure::megapascal;
    Pressure::new::<megapascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Pressure in the megapascals the correlation tables are calibrated to.
#[inline]
pub fn as_mpa(p: Pressure) -> f64 {
    use uom::si::pressure::megapascal;
    p.get::<megapascal>()
}

/// Temperature in kelvin.
#[inline]
pub fn as_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Density in kg/m3.
#[inline]
pub fn as_kgm3(rho: Density) -> f64 {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    rho.get::<kilogram_per_cubic_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _rho = kgm3(997.0);
    }

    #[test]
    fn unit_round_trips() {
        let p = mpa(16.529_164_3);
        assert!((as_mpa(p) - 16.529_164_3).abs() < 1e-12);
        assert!((as_kelvin(k(623.15)) - 623.15).abs() < 1e-12);
        assert!((as_kgm3(kgm3(322.0)) - 322.0).abs() < 1e-12);
    }
}
