pub mod account_repository_memory;
