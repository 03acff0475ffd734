pub mod db;
pub mod userdb;
pub mod lookupdb;
pub mod propertydb;
pub mod leaddb;
pub mod viewingdb;
pub mod referraldb;
pub mod teamdb;
pub mod dcsrdb;
pub mod calendardb;
pub mod commissiondb;
