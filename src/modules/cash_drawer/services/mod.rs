pub mod cash_drawer_service;

pub use cash_drawer_service::CashDrawerService;
