pub mod attempt_service;
pub mod grading_service;
pub mod module_service;
pub mod progress_service;
pub mod quiz_service;
pub mod user_service;
