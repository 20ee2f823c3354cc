pub mod cash_drawer;
pub mod health;
pub mod reports;
