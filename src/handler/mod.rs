pub mod calendar;
pub mod dcsr_reports;
pub mod leads;
pub mod lookups;
pub mod properties;
pub mod referrals;
pub mod reports;
pub mod teams;
pub mod users;
pub mod viewings;
