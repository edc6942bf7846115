mod repository;

pub use repository::{Storage, DRAFTS_KEY, SETTINGS_KEY};
