pub mod expense;
pub mod settings;
pub mod view;
