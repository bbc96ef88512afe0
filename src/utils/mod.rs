pub mod environment;
pub mod files;

pub use environment::get_config_dir;
pub use files::{format_path_with_tilde, validate_file_size};
