pub mod provider_client;

pub use provider_client::{
    AuthProviderClient, ProviderError, ProviderErrorCode, ProviderIdentity, ProviderResult,
    ProviderSession,
};
