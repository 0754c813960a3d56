use crate::lulu_api::client::LuluClient;
use crate::lulu_api::request::RequestDescriptor;
use crate::lulu_api::resources::{
    JobStatistics, List, PrintJob, PrintJobCalculationOptions, PrintJobCost,
    PrintJobCreateOptions, PrintJobListOptions, PrintJobStatisticsOptions, Status,
};
use crate::lulu_api::types::LuluError;
use std::sync::Arc;

/// `/print-jobs/` endpoints and cost calculation
#[derive(Debug, Clone)]
pub struct PrintJobs {
    client: Arc<LuluClient>,
}

impl PrintJobs {
    pub fn new(client: Arc<LuluClient>) -> Self {
        Self { client }
    }

    /// Retrieve a list of print jobs
    pub async fn list(&self, params: &PrintJobListOptions) -> Result<List<PrintJob>, LuluError> {
        tracing::debug!("Listing print jobs: {:?}", params);
        let descriptor = RequestDescriptor::get("/print-jobs/").query(params)?;
        self.client.send_as(descriptor).await
    }

    /// Retrieve the number of print jobs in each status
    pub async fn statistics(
        &self,
        params: &PrintJobStatisticsOptions,
    ) -> Result<JobStatistics, LuluError> {
        let descriptor = RequestDescriptor::get("/print-jobs/statistics/").query(params)?;
        self.client.send_as(descriptor).await
    }

    /// Retrieve a single print job
    pub async fn retrieve(&self, id: &str) -> Result<PrintJob, LuluError> {
        let descriptor = RequestDescriptor::get(job_path(id, "")?);
        self.client.send_as(descriptor).await
    }

    /// Retrieve only the costs of a print job
    pub async fn cost(&self, id: &str) -> Result<PrintJobCost, LuluError> {
        let descriptor = RequestDescriptor::get(job_path(id, "costs/")?);
        self.client.send_as(descriptor).await
    }

    /// Retrieve the status of a print job
    pub async fn status(&self, id: &str) -> Result<Status, LuluError> {
        let descriptor = RequestDescriptor::get(job_path(id, "status/")?);
        self.client.send_as(descriptor).await
    }

    /// Calculate product and shipping cost without creating a print job
    ///
    /// The shipping address is needed to work out sales tax / VAT and
    /// shipping cost.
    pub async fn calculation(
        &self,
        params: &PrintJobCalculationOptions,
    ) -> Result<PrintJobCost, LuluError> {
        tracing::debug!(
            "Calculating print job cost for {} line items",
            params.line_items.len()
        );
        let descriptor = RequestDescriptor::post("/print-job-cost-calculations/").json(params)?;
        self.client.send_as(descriptor).await
    }

    /// Create a new print job
    pub async fn create(&self, params: &PrintJobCreateOptions) -> Result<PrintJob, LuluError> {
        tracing::info!(
            "Creating print job with {} line items (external_id={:?})",
            params.line_items.len(),
            params.external_id
        );
        let descriptor = RequestDescriptor::post("/print-jobs/").json(params)?;
        let job: PrintJob = self.client.send_as(descriptor).await?;
        tracing::info!("Print job created: id={}", job.id);
        Ok(job)
    }
}

/// `/print-jobs/{id}/{suffix}`, rejecting ids that would change the path
fn job_path(id: &str, suffix: &str) -> Result<String, LuluError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(LuluError::Configuration(
            "Print job id must not be empty".to_string(),
        ));
    }
    if id.contains(['/', '?', '#']) {
        return Err(LuluError::Configuration(format!(
            "Invalid print job id '{}'",
            id
        )));
    }
    Ok(format!("/print-jobs/{}/{}", id, suffix))
}
