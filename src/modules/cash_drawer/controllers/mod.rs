mod cash_drawer_controller;

pub use cash_drawer_controller::{create_entry, get_summary, DrawerSummaryQuery};

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cash_drawer_controller::configure(cfg);
}
