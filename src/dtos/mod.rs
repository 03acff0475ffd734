pub mod userdtos;
pub mod propertydtos;
pub mod leaddtos;
pub mod viewingdtos;
pub mod referraldtos;
pub mod teamdtos;
pub mod dcsrdtos;
pub mod calendardtos;
