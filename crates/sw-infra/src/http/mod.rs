pub mod api_client;

pub use api_client::HttpSetupApi;
