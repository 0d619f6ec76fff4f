//! Error types for meridian-llm

use crate::vendor::Vendor;
use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Vendor tag not recognized
    #[error("unknown vendor: {0}")]
    UnknownVendor(String),

    /// A vendor integration was shipped without any pricing data
    #[error("no price table configured for vendor '{0}'")]
    MissingPriceTable(Vendor),

    /// Payload is neither a recognizable success nor error shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Pricing catalog could not be read or parsed
    #[error("pricing catalog error: {0}")]
    Catalog(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
