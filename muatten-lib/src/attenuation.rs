use crate::constants::{ENERGY_DECIMALS, TRANSMISSION_DECIMALS};

/// Round `value` to `decimals` places, ties to even.
///
/// The value is scaled by `10^decimals`, rounded half-to-even, and scaled
/// back, so `0.125` rounds to `0.12` and `0.375` to `0.38`.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Round a photon energy (keV) to the table's 0.1 keV resolution.
#[inline]
pub fn round_energy(energy_kev: f64) -> f64 {
    round_half_even(energy_kev, ENERGY_DECIMALS)
}

/// Percentage of photons transmitted through `thickness_cm` of material
/// (Beer–Lambert law), rounded to two decimals.
///
/// Negative thickness is not rejected; it yields values above 100.
pub fn transmission_percent(coefficient: f64, thickness_cm: f64) -> f64 {
    round_half_even(
        (-coefficient * thickness_cm).exp() * 100.0,
        TRANSMISSION_DECIMALS,
    )
}
