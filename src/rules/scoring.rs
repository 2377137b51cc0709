//! Clear rewards.

use crate::core::{Card, ClearOutcome, RulesConfig};

/// Score a stack being cleared.
///
/// A full chain (every rank `1..=5` present, wildcards ignored) pays
/// `reward_full_chain`, multiplied by `reward_zero_multiplier` once per
/// wildcard in the stack. Anything else pays nothing, wildcards or not.
#[must_use]
pub fn score_clear(stack: &[Card], config: &RulesConfig) -> ClearOutcome {
    let zeros = stack.iter().filter(|c| c.is_wildcard()).count() as u32;
    let full_chain = is_full_chain(stack);

    let mut reward = if full_chain {
        config.reward_full_chain
    } else {
        0.0
    };
    if zeros > 0 && reward > 0.0 {
        reward *= config.reward_zero_multiplier.powi(zeros as i32);
    }

    ClearOutcome {
        reward,
        full_chain,
        zeros,
    }
}

/// Do the non-wildcard cards of `stack` form exactly the set `{1, 2, 3, 4, 5}`?
#[must_use]
pub fn is_full_chain(stack: &[Card]) -> bool {
    // bit r set for each rank r present
    let present = stack
        .iter()
        .filter(|c| !c.is_wildcard())
        .fold(0u8, |bits, c| bits | (1 << c.value()));
    present == 0b11_1110
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v)).collect()
    }

    #[test]
    fn test_full_chain_pays() {
        let outcome = score_clear(&cards(&[1, 2, 3, 4, 5]), &RulesConfig::default());
        assert_eq!(outcome.reward, 1000.0);
        assert!(outcome.full_chain);
        assert_eq!(outcome.zeros, 0);
    }

    #[test]
    fn test_wildcard_doubles_full_chain() {
        let outcome = score_clear(&cards(&[0, 1, 2, 3, 4, 5]), &RulesConfig::default());
        assert_eq!(outcome.reward, 2000.0);
        assert!(outcome.full_chain);
        assert_eq!(outcome.zeros, 1);
    }

    #[test]
    fn test_multiplier_per_wildcard() {
        let config = RulesConfig::default();
        for z in 0..4usize {
            let mut values = vec![0u8; z];
            values.extend_from_slice(&[1, 2, 3, 4, 5]);
            let outcome = score_clear(&cards(&values), &config);
            assert_eq!(outcome.reward, 1000.0 * 2f64.powi(z as i32));
            assert_eq!(outcome.zeros, z as u32);
        }
    }

    #[test]
    fn test_partial_chain_pays_nothing() {
        let config = RulesConfig::default();
        let outcome = score_clear(&cards(&[1, 2, 3, 4]), &config);
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.full_chain);

        // wildcards do not rescue a partial chain
        let outcome = score_clear(&cards(&[0, 0, 2, 3, 5]), &config);
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.full_chain);
        assert_eq!(outcome.zeros, 2);
    }

    #[test]
    fn test_only_wildcards() {
        let outcome = score_clear(&cards(&[0, 0, 0]), &RulesConfig::default());
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.full_chain);
        assert_eq!(outcome.zeros, 3);
    }

    #[test]
    fn test_full_chain_ignores_order() {
        assert!(is_full_chain(&cards(&[5, 4, 3, 2, 1])));
        assert!(is_full_chain(&cards(&[1, 0, 2, 3, 0, 4, 5])));
        assert!(!is_full_chain(&cards(&[2, 3, 4, 5])));
        assert!(!is_full_chain(&[]));
    }

    #[test]
    fn test_custom_payouts() {
        let config = RulesConfig::new()
            .with_reward_full_chain(10.0)
            .with_reward_zero_multiplier(3.0);
        let outcome = score_clear(&cards(&[0, 0, 1, 2, 3, 4, 5]), &config);
        assert_eq!(outcome.reward, 90.0);
    }
}
