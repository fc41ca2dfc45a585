pub mod catalog;
pub mod config;
pub mod fetch;
pub mod history;
pub mod opener;
pub mod output;
pub mod session;
pub mod shell;
pub mod storage;
pub mod theme;
pub mod theme_store;
