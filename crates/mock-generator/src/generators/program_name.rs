//! Program name generator.
//!
//! Program names are six characters drawn uniformly from uppercase ASCII
//! letters and digits.

use crate::record::{ProgramName, PROGRAM_NAME_ALPHABET, PROGRAM_NAME_LEN};
use rand::Rng;

/// Generate a random program name.
pub fn generate_program_name<R: Rng>(rng: &mut R) -> ProgramName {
    ProgramName::from_generated(generate_alphanumeric(rng, PROGRAM_NAME_LEN))
}

/// Generate `len` characters from [`PROGRAM_NAME_ALPHABET`].
fn generate_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..PROGRAM_NAME_ALPHABET.len());
            PROGRAM_NAME_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_program_name_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let name = generate_program_name(&mut rng);
            let s = name.as_str();
            assert_eq!(s.len(), 6);
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_program_name_uses_letters_and_digits() {
        let mut rng = StdRng::seed_from_u64(5);
        let joined: String = (0..100)
            .map(|_| generate_program_name(&mut rng).to_string())
            .collect();

        assert!(joined.chars().any(|c| c.is_ascii_digit()));
        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
    }
}
