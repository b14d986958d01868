pub mod account_number_generator;
pub mod account_repository;
pub mod password_hasher;
pub mod token_issuer;
