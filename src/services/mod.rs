pub mod api_client;
pub mod token_store;

pub use api_client::EventApi;
pub use token_store::TokenStore;

#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
#[cfg(target_arch = "wasm32")]
pub use token_store::LocalTokenStore;
