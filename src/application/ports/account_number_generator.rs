/// Source of candidate public account numbers. Uniqueness is enforced by the
/// store; generators only need to spread candidates.
pub trait AccountNumberGenerator: Send + Sync {
    fn next_number(&self) -> i64;
}
