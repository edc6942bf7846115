pub mod article;
pub mod config;
pub mod generator;
pub mod output;
pub mod prompts;
pub mod storage;
