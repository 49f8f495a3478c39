pub mod expense_service;
pub mod format_service;
pub mod validation_service;
pub mod view_service;
