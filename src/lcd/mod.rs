pub mod command;
pub mod configure;
pub mod custom_char;
pub mod error;
pub mod json;
pub mod main;
pub mod session;
pub mod write_lines;

#[cfg(test)]
mod tests;
