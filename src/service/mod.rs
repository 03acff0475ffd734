pub mod background_jobs;
pub mod commission_service;
pub mod dcsr_service;
pub mod error;
pub mod export_service;
pub mod reference_service;
pub mod reminder_service;
