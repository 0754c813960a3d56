//! Lulu SDK
//!
//! A Rust client for the Lulu Print API.
//!
//! This SDK provides:
//! - OAuth2 client-credentials and API-key authentication with token caching
//!   and refresh ahead of expiry
//! - Typed wrappers for shipping options, print jobs and cost calculations
//! - Type definitions for API requests/responses and error handling
//!
//! # Example
//!
//! ```no_run
//! use lulu_sdk::{Environment, LuluConfig, LuluService, PrintJobListOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LuluConfig::client_credentials(
//!     "client-key",
//!     "client-secret",
//!     Environment::Development,
//! );
//! let lulu = LuluService::new(config)?;
//!
//! // The first call authenticates; later calls reuse the token
//! let jobs = lulu.print_jobs().list(&PrintJobListOptions::default()).await?;
//! println!("{} print jobs", jobs.count);
//!
//! let status = lulu.print_jobs().status("12345").await?;
//! println!("Job 12345 is {:?}", status.name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lulu_api;
pub mod service;

// Re-export commonly used types and functions
pub use config::{ApiKey, ConfigOptions, Credentials, Environment, LuluConfig};
pub use lulu_api::{
    client::LuluClient,
    jwt::{decode_token, TokenClaims},
    print_jobs::PrintJobs,
    request::{merge_data, Headers, RequestDescriptor},
    resources::{
        JobStatistics, LineItemPrintable, List, PrintJob, PrintJobCalculationOptions,
        PrintJobCost, PrintJobCreateLineItem, PrintJobCreateOptions, PrintJobEstimateItem,
        PrintJobListOptions, PrintJobSource, PrintJobStatisticsOptions, ShippingAddress,
        ShippingLevel, ShippingListOptions, ShippingOption, Status, StatusName, Title,
    },
    shipping_options::ShippingOptions,
    token::{AuthenticationResponse, TokenState},
    transport::{HttpRequest, HttpTransport, ReqwestTransport, RequestBody},
    types::{ApiError, LuluError},
};
pub use service::LuluService;
