pub mod config;
pub mod console_interface;
pub mod core;
pub mod level_file;
pub mod session;

#[cfg(test)]
mod test;
