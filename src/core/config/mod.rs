pub mod data;
pub mod io;
pub mod printing;

pub use data::{path_display, Config, ReadFormat};
pub use io::{ConfigError, ProjectPaths};

#[cfg(test)]
pub mod tests;
