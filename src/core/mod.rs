pub mod attend;
pub mod backup;
pub mod directory;
pub mod ledger;
pub mod log;
pub mod register;
pub mod registry;
pub mod report;
