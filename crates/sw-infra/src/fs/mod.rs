pub mod app_data_dir;
pub mod path_probe;

pub use app_data_dir::{app_data_dir, state_dir};
pub use path_probe::LocalPathProbe;
