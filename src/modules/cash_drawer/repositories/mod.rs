pub mod cash_drawer_repository;

pub use cash_drawer_repository::{CashDrawerRepository, MySqlCashDrawerRepository};
