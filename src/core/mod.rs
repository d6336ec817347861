pub mod api_key;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod history;
pub mod llm;
pub mod message;
pub mod paths;
pub mod search;
pub mod selection;
