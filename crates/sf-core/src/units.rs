// sf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

pub mod constants {
    pub const G0_MPS2: f64 = 9.806_65;

    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _a = m2(3.1);
        let _q = m3ps(0.01);
    }

    #[test]
    fn si_value_passthrough() {
        use uom::si::volume::cubic_meter;
        assert_eq!(m3(6.3).get::<cubic_meter>(), 6.3);
    }
}
