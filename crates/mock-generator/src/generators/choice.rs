//! Uniform picks from fixed enumerations.

use crate::record::{Carrier, Status};
use rand::Rng;

/// Pick one of `values` uniformly.
fn one_of<R: Rng, T: Copy, const N: usize>(rng: &mut R, values: &[T; N]) -> T {
    values[rng.random_range(0..N)]
}

/// Generate a random status.
pub fn generate_status<R: Rng>(rng: &mut R) -> Status {
    one_of(rng, &Status::ALL)
}

/// Generate a random carrier.
pub fn generate_carrier<R: Rng>(rng: &mut R) -> Carrier {
    one_of(rng, &Carrier::ALL)
}
