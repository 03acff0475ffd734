pub mod usermodel;
pub mod propertymodel;
pub mod leadmodel;
pub mod viewingmodel;
pub mod referralmodel;
pub mod teammodel;
pub mod dcsrmodel;
pub mod calendarmodel;
pub mod commissionmodel;
