//! Generation provider client

mod factory;
mod http_client;
mod mistral;

pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use mistral::{MistralProvider, DEFAULT_MISTRAL_BASE_URL};
