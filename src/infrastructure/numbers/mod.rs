use rand::Rng;

use crate::application::ports::account_number_generator::AccountNumberGenerator;
use crate::domain::accounts::account::{MAX_ACCOUNT_NUMBER, MIN_ACCOUNT_NUMBER};

/// Uniformly random six-digit account numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAccountNumbers;

impl AccountNumberGenerator for RandomAccountNumbers {
    fn next_number(&self) -> i64 {
        rand::thread_rng().gen_range(MIN_ACCOUNT_NUMBER..=MAX_ACCOUNT_NUMBER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_stay_in_range() {
        let numbers = RandomAccountNumbers;
        for _ in 0..1_000 {
            let n = numbers.next_number();
            assert!((MIN_ACCOUNT_NUMBER..=MAX_ACCOUNT_NUMBER).contains(&n));
        }
    }
}
