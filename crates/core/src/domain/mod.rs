pub mod draft;
pub mod error;
pub mod settings;
pub mod theme;
pub mod theme_selector;
pub mod types;

mod serde_tests;
