use crate::lulu_api::client::LuluClient;
use crate::lulu_api::request::RequestDescriptor;
use crate::lulu_api::resources::{List, ShippingListOptions, ShippingOption};
use crate::lulu_api::types::LuluError;
use std::sync::Arc;

/// `/print-shipping-options/` endpoint
#[derive(Debug, Clone)]
pub struct ShippingOptions {
    client: Arc<LuluClient>,
}

impl ShippingOptions {
    pub fn new(client: Arc<LuluClient>) -> Self {
        Self { client }
    }

    /// List shipping options for a destination and product
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lulu_sdk::{LuluService, LuluConfig, Environment, ShippingListOptions};
    ///
    /// # async fn example() -> Result<(), lulu_sdk::LuluError> {
    /// let lulu = LuluService::new(LuluConfig::api_key("key", Environment::Development))?;
    /// let options = lulu
    ///     .shipping_options()
    ///     .list(&ShippingListOptions {
    ///         iso_country_code: Some("US".to_string()),
    ///         currency: Some("USD".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// println!("Found {} shipping options", options.count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(
        &self,
        params: &ShippingListOptions,
    ) -> Result<List<ShippingOption>, LuluError> {
        tracing::debug!("Listing shipping options: {:?}", params);
        let descriptor = RequestDescriptor::get("/print-shipping-options/").query(params)?;
        self.client.send_as(descriptor).await
    }
}
