pub mod emitters;
pub mod generator;

pub use emitters::config_file_name;
pub use generator::WebpackGenerator;
