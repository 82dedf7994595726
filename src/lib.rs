// Crate root library declaration and module exports.
pub mod calendar;
pub mod cli;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod feed;
pub mod model;
pub mod notifications;
pub mod recommend;
pub mod storage;
pub mod store;
pub mod system;
