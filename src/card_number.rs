use crate::constants::CARD_NUMBER_PATTERN;
use crate::errors::BankError;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

static CARD_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CARD_NUMBER_PATTERN).unwrap_or_else(|e| panic!("bad card number pattern: {e}"))
});

/// True when `text` is four hyphen separated groups of four digits
pub fn is_valid_format(text: &str) -> bool {
    CARD_NUMBER_RE.is_match(text)
}

/// Four random groups in 1000..=9999 joined by hyphens
fn random_card_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let groups: Vec<String> = (0..4)
        .map(|_| rng.gen_range(1000..=9999u16).to_string())
        .collect();
    groups.join("-")
}

/// Draws card numbers until one is not `is_taken`.
/// Gives up with `GenerationExhausted` after `max_attempts` collisions.
pub fn generate<R, F>(rng: &mut R, is_taken: F, max_attempts: u32) -> Result<String, BankError>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..max_attempts {
        let candidate = random_card_number(rng);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(%candidate, "card number collision, retrying");
    }
    Err(BankError::GenerationExhausted)
}

#[cfg(test)]
mod tests {
    use super::{generate, is_valid_format, random_card_number};
    use crate::errors::BankError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::collections::HashSet;

    #[test]
    fn tst_is_valid_format() {
        assert!(is_valid_format("1234-5678-9012-3456"));
        assert!(is_valid_format("0000-0000-0000-0000"));
        assert!(!is_valid_format("1234-5678-9012-345"));
        assert!(!is_valid_format("1234567890123456"));
        assert!(!is_valid_format("1234-5678-9012-3456 "));
        assert!(!is_valid_format("abcd-5678-9012-3456"));
        assert!(!is_valid_format(""));
    }

    #[test]
    fn tst_generated_numbers_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let card = random_card_number(&mut rng);
            assert!(is_valid_format(&card), "{card} is malformed");
            assert!(
                card.split('-').all(|g| !g.starts_with('0')),
                "Each group stays in 1000..=9999"
            );
        }
    }

    #[test]
    fn tst_generate_skips_existing() {
        let mut existing = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let card = generate(&mut rng, |c| existing.contains(c), 10).unwrap();
            assert!(existing.insert(card), "Should never repeat an existing number");
        }
    }

    #[test]
    fn tst_generate_checks_every_draw() {
        let checked = Cell::new(0);
        let res = generate(
            &mut StdRng::seed_from_u64(3),
            |_| {
                checked.set(checked.get() + 1);
                true
            },
            4,
        );
        assert_eq!(res, Err(BankError::GenerationExhausted));
        assert_eq!(checked.get(), 4);
    }

    #[test]
    fn tst_generate_exhausted() {
        let first = random_card_number(&mut StdRng::seed_from_u64(1));
        let existing = HashSet::from([first.clone()]);

        // Same seed reproduces the colliding draw
        let res = generate(&mut StdRng::seed_from_u64(1), |c| existing.contains(c), 1);
        assert_eq!(res, Err(BankError::GenerationExhausted));

        let res = generate(&mut StdRng::seed_from_u64(1), |c| existing.contains(c), 0);
        assert_eq!(res, Err(BankError::GenerationExhausted));

        let res = generate(&mut StdRng::seed_from_u64(1), |c| existing.contains(c), 5);
        assert!(res.is_ok_and(|card| card != first));
    }
}
