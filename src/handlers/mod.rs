pub mod announcement_handlers;
pub mod auth_handlers;
pub mod complaint_handlers;
pub mod content_handlers;
pub mod corporate_handlers;
pub mod dashboard;
pub mod directorate_handlers;
pub mod document_handlers;
pub mod edit_handlers;
pub mod muhtar_handlers;
pub mod records;
pub mod settings_handlers;
pub mod upload_handlers;
pub mod user_handlers;
