//! Response normalization
//!
//! Maps a vendor's decoded JSON payload into the canonical [`Response`].
//! The vendor tag selects the extractor; cost calculation and thinking
//! extraction run while the response is assembled.
//!
//! # Module Structure
//!
//! - `anthropic`: content-block payloads (`content[]` of text/tool_use)
//! - `chat`: single-choice payloads (`choices[0].message`) shared by the
//!   OpenAI-compatible vendors
//! - `voyage`: embedding payloads

mod anthropic;
mod chat;
mod voyage;


use crate::config::PricingConfig;
use crate::cost::{default_pricing, CostCalculator, PricingTable, TokenCounts};
use crate::error::Result;
use crate::response::{Response, ResponseStatus, ToolCallRequest, Usage};
use crate::thinking::extract_thinking;
use crate::vendor::Vendor;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fields pulled out of a successful payload, before pricing
#[derive(Debug, Default)]
pub(crate) struct Extracted {
    pub id: String,
    pub model: String,
    pub content: Option<String>,
    pub reasoning: Option<String>,
    pub finish_reason: Option<String>,
    pub tool_calls: Vec<ToolCallRequest>,
    pub usage: Option<Usage>,
    pub citations: Option<Vec<String>>,
    pub embeddings: Option<Vec<Vec<f64>>>,
}

/// Vendor-side error found in a payload
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct VendorError {
    pub message: String,
    pub status: Option<u16>,
}

/// Maps vendor payloads into canonical responses
#[derive(Debug, Clone)]
pub struct Normalizer {
    calculator: CostCalculator,
    tolerate_missing_prices: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(default_pricing())
    }
}

impl Normalizer {
    /// Create a normalizer over the given pricing
    #[must_use]
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        Self {
            calculator: CostCalculator::new(pricing),
            tolerate_missing_prices: false,
        }
    }

    /// Build from pricing configuration
    pub fn from_config(config: &PricingConfig) -> Result<Self> {
        let pricing = PricingTable::from_config(config)?;
        Ok(Self::new(Arc::new(pricing))
            .with_tolerate_missing_prices(config.tolerate_missing_prices))
    }

    /// Report unknown models as `0.0` instead of `None`
    #[must_use]
    pub fn with_tolerate_missing_prices(mut self, tolerate: bool) -> Self {
        self.tolerate_missing_prices = tolerate;
        self
    }

    /// The calculator used for cost
    #[must_use]
    pub fn calculator(&self) -> &CostCalculator {
        &self.calculator
    }

    /// Normalize a payload identified by a vendor tag such as `"anthropic"`
    pub fn normalize_tagged(&self, vendor_tag: &str, raw: Value) -> Result<Response> {
        self.normalize(vendor_tag.parse()?, raw)
    }

    /// Normalize a decoded payload from `vendor`.
    ///
    /// Vendor errors encoded in the payload become `status = Error`
    /// responses. `Err` is reserved for unrecognizable payloads and missing
    /// vendor price tables.
    #[instrument(skip_all, fields(vendor = %vendor))]
    pub fn normalize(&self, vendor: Vendor, raw: Value) -> Result<Response> {
        let vendor_error = match vendor {
            Vendor::Anthropic => anthropic::error(&raw),
            Vendor::Voyage => voyage::error(&raw),
            _ => chat::error(&raw),
        };
        if let Some(err) = vendor_error {
            debug!(status = ?err.status, "Vendor returned an error payload");
            return Ok(error_response(vendor, err, raw));
        }

        let extracted = match vendor {
            Vendor::Anthropic => anthropic::extract(&raw)?,
            Vendor::Voyage => voyage::extract(&raw)?,
            _ => chat::extract(vendor, &raw)?,
        };

        self.assemble(vendor, extracted, raw)
    }

    fn assemble(&self, vendor: Vendor, extracted: Extracted, raw: Value) -> Result<Response> {
        let Extracted {
            id,
            model,
            content,
            reasoning,
            finish_reason,
            tool_calls,
            usage,
            citations,
            embeddings,
        } = extracted;

        // an empty usage object reports nothing
        let usage = usage.filter(|usage| *usage != Usage::default());

        let cost = match &usage {
            Some(usage) => {
                let cost = self
                    .calculator
                    .cost_for(vendor, &model, &TokenCounts::from(usage))?;
                match cost {
                    None if self.tolerate_missing_prices => Some(0.0),
                    other => other,
                }
            }
            None => None,
        };

        let (assistant_content, reasoning_content) = match content {
            Some(text) if !vendor.has_native_reasoning() => {
                let split = extract_thinking(&text);
                (Some(split.visible), split.reasoning)
            }
            other => (other, reasoning),
        };

        let usage = usage.unwrap_or_default();
        debug!(model = %model, cost = ?cost, tool_calls = tool_calls.len(), "Normalized response");

        Ok(Response {
            id,
            model,
            vendor,
            assistant_content,
            reasoning_content,
            finish_reason,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            cache_write_tokens: usage.cache_write_tokens,
            cache_read_tokens: usage.cache_read_tokens,
            total_tokens: usage.total_tokens,
            cost,
            tools_used: !tool_calls.is_empty(),
            tool_calls,
            citations,
            embeddings,
            status: ResponseStatus::Success,
            error_message: None,
            http_status_code: None,
            raw_response: raw,
        })
    }
}

/// Normalize with the built-in pricing tables
pub fn normalize(vendor_tag: &str, raw: Value) -> Result<Response> {
    Normalizer::default().normalize_tagged(vendor_tag, raw)
}

fn error_response(vendor: Vendor, err: VendorError, raw: Value) -> Response {
    Response {
        id: str_at(&raw, "/id").unwrap_or_default(),
        model: str_at(&raw, "/model").unwrap_or_default(),
        vendor,
        assistant_content: None,
        reasoning_content: None,
        finish_reason: None,
        input_tokens: None,
        output_tokens: None,
        cache_write_tokens: None,
        cache_read_tokens: None,
        total_tokens: None,
        cost: None,
        tools_used: false,
        tool_calls: Vec::new(),
        citations: None,
        embeddings: None,
        status: ResponseStatus::Error,
        error_message: Some(err.message),
        http_status_code: err.status,
        raw_response: raw,
    }
}

// ============================================================================
// JSON helpers shared by the extractors
// ============================================================================

pub(crate) fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(crate) fn u64_at(value: &Value, pointer: &str) -> Option<u64> {
    value.pointer(pointer).and_then(Value::as_u64)
}

pub(crate) fn status_code(value: Option<&Value>) -> Option<u16> {
    value
        .and_then(Value::as_u64)
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| u16::try_from(code).ok())
}

/// Sum the reported counters, `None` when none were reported
pub(crate) fn sum_reported(counts: &[Option<u64>]) -> Option<u64> {
    counts
        .iter()
        .flatten()
        .copied()
        .reduce(|acc, n| acc.saturating_add(n))
}
