use serde::{Deserialize, Serialize};

/// Paginated list response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Either a single value or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Shipping service level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingLevel {
    Mail,
    PriorityMail,
    GroundHd,
    GroundBus,
    Ground,
    Expedited,
    Express,
}

/// Recipient title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Title {
    Mr,
    Miss,
    Mrs,
    Ms,
    Dr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub city: String,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_business: Option<bool>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub phone_number: String,
    #[serde(alias = "postalcode")]
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub amount: String,
    pub description: String,
}

// ============================================================================
// Shipping options
// ============================================================================

/// Query parameters for `GET /print-shipping-options/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ShippingLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postbox_ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fastest_per_level: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: u64,
    pub level: ShippingLevel,
    pub currency: String,
    pub cost_excl_tax: String,
    #[serde(default)]
    pub business_only: bool,
    #[serde(default)]
    pub home_only: bool,
    #[serde(default)]
    pub postbox_ok: bool,
    #[serde(default)]
    pub traceable: bool,
    #[serde(default)]
    pub min_dispatch_date: Option<String>,
    #[serde(default)]
    pub max_dispatch_date: Option<String>,
    #[serde(default)]
    pub min_delivery_date: Option<String>,
    #[serde(default)]
    pub max_delivery_date: Option<String>,
    #[serde(default)]
    pub shipping_buffer: Option<u32>,
    #[serde(default, alias = "total_day_min")]
    pub total_days_min: Option<u32>,
    #[serde(default)]
    pub total_days_max: Option<u32>,
    #[serde(default)]
    pub transit_time: Option<u32>,
}

// ============================================================================
// Print jobs
// ============================================================================

/// Query parameters for `GET /print-jobs/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintJobListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_line_items: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

/// Query parameters for `GET /print-jobs/statistics/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintJobStatisticsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatistics {
    pub count: u64,
    pub status: String,
}

/// Print job status name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusName {
    Created,
    Unpaid,
    PaymentInProgress,
    ProductionDelayed,
    ProductionReady,
    Accepted,
    Rejected,
    InProduction,
    Error,
    Shipped,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub name: StatusName,
    #[serde(default)]
    pub changed: Option<String>,
    /// Free text or a structured message object, depending on the status
    #[serde(default)]
    pub messages: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedShippingDates {
    pub arrival_min: String,
    pub arrival_max: String,
    pub dispatch_min: String,
    pub dispatch_max: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemCost {
    #[serde(default)]
    pub cost_excl_discounts: Option<String>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    pub quantity: u32,
    pub tax_rate: String,
    #[serde(default)]
    pub total_cost_excl_discounts: Option<String>,
    pub total_cost_excl_tax: String,
    pub total_cost_incl_tax: String,
    pub total_tax: String,
    #[serde(default)]
    pub unit_tier_cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingCost {
    pub tax_rate: String,
    pub total_cost_excl_tax: String,
    pub total_cost_incl_tax: String,
    pub total_tax: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobCost {
    pub currency: String,
    /// `null` until costs have been calculated
    #[serde(default)]
    pub line_item_costs: Option<OneOrMany<LineItemCost>>,
    pub shipping_cost: ShippingCost,
    pub total_cost_excl_tax: String,
    pub total_cost_incl_tax: String,
    #[serde(default)]
    pub total_discount_amount: Option<String>,
    pub total_tax: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub file_id: u64,
    pub filename: String,
}

/// A cover or interior file as processed by Lulu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableItem {
    #[serde(default)]
    pub job_id: Option<u64>,
    #[serde(default)]
    pub normalized_file: Option<File>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub source_file: Option<File>,
    #[serde(default)]
    pub source_md5sum: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableNormalization {
    #[serde(default)]
    pub cover: Option<PrintableItem>,
    #[serde(default)]
    pub interior: Option<PrintableItem>,
    #[serde(default)]
    pub pod_package_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reprint {
    pub cost_center: String,
    pub defect: String,
    pub description: String,
    pub printer_at_fault: String,
}

/// A line item of a print job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printable {
    pub id: u64,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub pod_package_id: Option<String>,
    #[serde(default)]
    pub printable_id: Option<String>,
    #[serde(default)]
    pub printable_normalization: Option<PrintableNormalization>,
    pub quantity: u32,
    #[serde(default)]
    pub status: Option<Status>,
    pub title: String,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub tracking_urls: Vec<String>,
    #[serde(default)]
    pub reprint: Option<Reprint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: u64,
    #[serde(default)]
    pub child_job_ids: Vec<u64>,
    pub contact_email: String,
    #[serde(default)]
    pub costs: Option<PrintJobCost>,
    pub date_created: String,
    pub date_modified: String,
    #[serde(default)]
    pub estimated_shipping_dates: Option<EstimatedShippingDates>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub line_items: Vec<Printable>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub production_delay: Option<u32>,
    #[serde(default)]
    pub production_due_time: Option<String>,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub shipping_level: Option<ShippingLevel>,
    #[serde(default)]
    pub shipping_option_level: Option<ShippingLevel>,
    #[serde(default)]
    pub tax_country: Option<String>,
    pub status: Status,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobEstimateItem {
    pub page_count: u32,
    pub pod_package_id: String,
    pub quantity: u32,
}

/// Body of `POST /print-job-cost-calculations/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobCalculationOptions {
    pub line_items: Vec<PrintJobEstimateItem>,
    pub shipping_address: ShippingAddress,
    pub shipping_option: ShippingLevel,
}

/// Source file for a cover or interior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobSource {
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_md5_sum: Option<String>,
}

impl PrintJobSource {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            source_md5_sum: None,
        }
    }
}

/// Source file in a `printable_normalization` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationSource {
    pub job_id: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_md5_sum: Option<String>,
}

/// What to print for a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineItemPrintable {
    /// A printable Lulu already holds
    Existing { printable_id: String },
    /// Fresh cover and interior files
    Files {
        pod_package_id: String,
        cover: PrintJobSource,
        interior: PrintJobSource,
    },
    /// Files from an earlier normalization job
    Normalized {
        printable_normalization: NormalizationRequest,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRequest {
    pub cover: NormalizationSource,
    pub interior: NormalizationSource,
    pub pod_package_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobCreateLineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub quantity: u32,
    pub title: String,
    #[serde(flatten)]
    pub printable: LineItemPrintable,
}

/// Body of `POST /print-jobs/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJobCreateOptions {
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub line_items: Vec<PrintJobCreateLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_delay: Option<u32>,
    pub shipping_address: ShippingAddress,
    pub shipping_level: ShippingLevel,
}
