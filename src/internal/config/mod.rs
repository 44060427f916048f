pub mod _config;

pub use _config as config;
pub use _config::{get_version_info, AppConfig, VERSION};
