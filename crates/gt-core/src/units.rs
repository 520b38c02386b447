// gt-core/src/units.rs

use uom::si::f64::{
    MassRate as UomMassRate, Power as UomPower, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;

/// Seconds per hour, for kg/h and kJ/kWh rating units.
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn deg_f(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn kgph(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v / SECONDS_PER_HOUR)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Heat rate in kJ/kWh as a dimensionless energy ratio (input energy / output energy).
#[inline]
pub fn heat_rate_kj_per_kwh(v: f64) -> Ratio {
    unitless(v / SECONDS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_output() {
        use uom::si::power::watt;
        assert_eq!(kw(90_000.0).get::<watt>(), 9.0e7);
        assert_eq!(unitless(0.5).value, 0.5);
    }

    #[test]
    fn mass_rate_from_kg_per_hour() {
        use uom::si::mass_rate::kilogram_per_second;
        let mdot = kgph(3_600.0);
        assert!((mdot.get::<kilogram_per_second>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn heat_rate_as_efficiency_inverse() {
        // 3600 kJ/kWh is 100% efficient
        let hr = heat_rate_kj_per_kwh(3_600.0);
        assert!((hr.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fahrenheit_offset() {
        use uom::si::thermodynamic_temperature::kelvin;
        let t = deg_f(32.0);
        assert!((t.get::<kelvin>() - 273.15).abs() < 1e-9);
    }
}
