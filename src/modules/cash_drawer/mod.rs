pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CashDrawerEntry, DrawerSummary, EntryType, NewCashDrawerEntry};
pub use repositories::{CashDrawerRepository, MySqlCashDrawerRepository};
pub use services::CashDrawerService;
