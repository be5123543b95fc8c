pub mod config;
pub mod content;
pub mod error;
pub mod grading;
pub mod handlers;
pub mod locator;
pub mod paths;
pub mod state;
#[cfg(test)]
pub mod testing;
