//! Canonical response model
//!
//! Every vendor payload is mapped into a [`Response`] exactly once by the
//! normalizer. Token fields distinguish "not reported" (`None`) from
//! "reported as zero" (`Some(0)`).

use crate::vendor::Vendor;
use serde::{Deserialize, Serialize};

/// Outcome of a vendor call as encoded in the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The vendor produced a completion
    Success,
    /// The payload carried a vendor-side error object
    Error,
}

/// A vendor-reported request to invoke a local tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Vendor-assigned correlation id
    pub id: String,
    /// Name of the tool to invoke
    pub function_name: String,
    /// Raw JSON arguments, not yet parsed
    pub arguments_json: String,
}

impl ToolCallRequest {
    /// Create a new tool call request
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        function_name: impl Into<String>,
        arguments_json: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            function_name: function_name.into(),
            arguments_json: arguments_json.into(),
        }
    }
}

/// Search context tier reported by search-augmented vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    /// Smallest retrieval context
    Low,
    /// Default retrieval context
    Medium,
    /// Largest retrieval context
    High,
}

impl SearchContextSize {
    /// Parse a vendor label, ignoring case
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Token usage as reported by the vendor, before pricing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens in the vendor's accounting
    pub input_tokens: Option<u64>,
    /// Output tokens
    pub output_tokens: Option<u64>,
    /// Tokens written to the prompt cache
    pub cache_write_tokens: Option<u64>,
    /// Tokens served from the prompt cache
    pub cache_read_tokens: Option<u64>,
    /// Total tokens
    pub total_tokens: Option<u64>,
    /// Number of web search queries (search-augmented vendors)
    pub search_queries: Option<u64>,
    /// Search context tier (search-augmented vendors)
    pub search_context_size: Option<SearchContextSize>,
}

/// Vendor-agnostic response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Vendor response id
    pub id: String,
    /// Model reported by the vendor
    pub model: String,
    /// Vendor the payload came from
    pub vendor: Vendor,
    /// Visible answer text
    pub assistant_content: Option<String>,
    /// Reasoning text, disjoint from `assistant_content`
    pub reasoning_content: Option<String>,
    /// Stop reason exactly as the vendor reported it
    pub finish_reason: Option<String>,
    /// Input tokens
    pub input_tokens: Option<u64>,
    /// Output tokens
    pub output_tokens: Option<u64>,
    /// Cache write tokens
    pub cache_write_tokens: Option<u64>,
    /// Cache read tokens
    pub cache_read_tokens: Option<u64>,
    /// Total tokens
    pub total_tokens: Option<u64>,
    /// Cost in USD, `None` when usage or pricing is unknown
    pub cost: Option<f64>,
    /// Whether the vendor reported function-call content
    pub tools_used: bool,
    /// Tool calls in vendor order
    pub tool_calls: Vec<ToolCallRequest>,
    /// Source citations (search-augmented vendors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,
    /// Embedding vectors in input order (embedding vendors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<Vec<Vec<f64>>>,
    /// Success or vendor error
    pub status: ResponseStatus,
    /// Vendor error message
    pub error_message: Option<String>,
    /// HTTP status code (or vendor equivalent) for errors
    pub http_status_code: Option<u16>,
    /// The decoded payload this response was built from
    pub raw_response: serde_json::Value,
}

impl Response {
    /// Whether this response carries a vendor error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ResponseStatus::Error
    }

    /// Whether the caller should run tool calls before continuing
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.tools_used && !self.tool_calls.is_empty()
    }

    /// Usage counters as a single value, `None` when nothing was reported
    #[must_use]
    pub fn usage(&self) -> Option<Usage> {
        let usage = Usage {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            cache_write_tokens: self.cache_write_tokens,
            cache_read_tokens: self.cache_read_tokens,
            total_tokens: self.total_tokens,
            search_queries: None,
            search_context_size: None,
        };
        (usage != Usage::default()).then_some(usage)
    }
}
