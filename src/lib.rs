// Library exports for the Visual C++ installer log locator

pub mod cli;
pub mod config;
pub mod error;
pub mod logs;
