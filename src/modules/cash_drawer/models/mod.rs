pub mod cash_drawer_entry;

pub use cash_drawer_entry::{
    CashDrawerEntry, DrawerSummary, DrawerTotals, EntryType, NewCashDrawerEntry,
};
