use crate::config::LuluConfig;
use crate::lulu_api::client::LuluClient;
use crate::lulu_api::print_jobs::PrintJobs;
use crate::lulu_api::shipping_options::ShippingOptions;
use crate::lulu_api::transport::HttpTransport;
use crate::lulu_api::types::LuluError;
use std::sync::Arc;

/// Entry point bundling one authenticated client with every endpoint wrapper
///
/// All wrappers share the same `LuluClient`, and with it the same token.
#[derive(Debug, Clone)]
pub struct LuluService {
    client: Arc<LuluClient>,
    shipping_options: ShippingOptions,
    print_jobs: PrintJobs,
}

impl LuluService {
    pub fn new(config: LuluConfig) -> Result<Self, LuluError> {
        Ok(Self::from_client(Arc::new(LuluClient::new(config)?)))
    }

    pub fn with_transport(
        config: LuluConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, LuluError> {
        Ok(Self::from_client(Arc::new(LuluClient::with_transport(
            config, transport,
        )?)))
    }

    pub fn from_client(client: Arc<LuluClient>) -> Self {
        Self {
            shipping_options: ShippingOptions::new(client.clone()),
            print_jobs: PrintJobs::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &Arc<LuluClient> {
        &self.client
    }

    pub fn shipping_options(&self) -> &ShippingOptions {
        &self.shipping_options
    }

    pub fn print_jobs(&self) -> &PrintJobs {
        &self.print_jobs
    }
}
