pub mod create_account;
pub mod delete_account;
pub mod deposit;
pub mod list_accounts;
pub mod transfer;
