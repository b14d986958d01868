pub mod account_repository_sqlx;
