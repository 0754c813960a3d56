/// Lulu Print API integration module
///
/// ## Request Flow
///
/// 1. A resource wrapper (`ShippingOptions`, `PrintJobs`) builds a `RequestDescriptor`
/// 2. `LuluClient::send` makes sure a valid access token is held, minting or
///    refreshing it at the token endpoint when needed
/// 3. Default headers and the bearer token are merged into the request
/// 4. The request goes out through the configured `HttpTransport`
/// 5. The JSON response is deserialized into the wrapper's return type
pub mod client;
pub mod jwt;
pub mod print_jobs;
pub mod request;
pub mod resources;
pub mod shipping_options;
pub mod token;
pub mod transport;
pub mod types;

pub use client::LuluClient;
pub use jwt::{decode_token, TokenClaims};
pub use print_jobs::PrintJobs;
pub use request::{merge_data, Headers, RequestDescriptor};
pub use resources::*;
pub use shipping_options::ShippingOptions;
pub use token::{AuthenticationResponse, TokenState};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport, RequestBody};
pub use types::{ApiError, LuluError};
