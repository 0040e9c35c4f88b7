//! Health advice from a generative text provider
//!
//! The provider returns free text; [`AdviceService`] turns it into a short
//! list of tips and substitutes [`tips::FALLBACK_TIPS`] whenever the provider
//! cannot be used, so advice never fails a report.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::{HeatHealthError, Result};

pub mod gemini;
pub mod tips;

pub use gemini::GeminiClient;
pub use tips::{FALLBACK_TIPS, build_prompt, extract_tips, fallback_tips};

/// Single prompt, single free-text reply
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Why the fallback tips were used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceFailure {
    /// The provider could not be reached
    Transport,
    /// 401 or 403
    Unauthorized,
    /// 429
    QuotaExceeded,
    /// Any other non-success status
    Rejected(u16),
    /// The reply did not have the expected shape
    Malformed,
    Other,
}

impl AdviceFailure {
    #[must_use]
    pub fn classify(err: &HeatHealthError) -> Self {
        match err {
            HeatHealthError::ProviderUnavailable { status: None, .. } => AdviceFailure::Transport,
            HeatHealthError::ProviderUnavailable {
                status: Some(status),
                ..
            } => match status {
                401 | 403 => AdviceFailure::Unauthorized,
                429 => AdviceFailure::QuotaExceeded,
                other => AdviceFailure::Rejected(*other),
            },
            HeatHealthError::MalformedResponse { .. } => AdviceFailure::Malformed,
            _ => AdviceFailure::Other,
        }
    }
}

impl fmt::Display for AdviceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceFailure::Transport => write!(f, "transport"),
            AdviceFailure::Unauthorized => write!(f, "unauthorized"),
            AdviceFailure::QuotaExceeded => write!(f, "quota exceeded"),
            AdviceFailure::Rejected(status) => write!(f, "rejected with status {status}"),
            AdviceFailure::Malformed => write!(f, "malformed reply"),
            AdviceFailure::Other => write!(f, "other"),
        }
    }
}

/// Tips plus whether they came from the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceOutcome {
    pub tips: Vec<String>,
    /// `Some` when the fallback tips were substituted
    pub fallback: Option<AdviceFailure>,
}

pub struct AdviceService {
    provider: Arc<dyn AdviceProvider>,
}

impl AdviceService {
    pub fn new(provider: Arc<dyn AdviceProvider>) -> Self {
        Self { provider }
    }

    /// Ask for advice and extract tips; never fails.
    #[instrument(skip(self))]
    pub async fn advise(&self, city: &str, temperature: f64, humidity: f64) -> AdviceOutcome {
        let prompt = build_prompt(city, temperature, humidity);

        match self.provider.complete(&prompt).await {
            Ok(reply) => {
                let tips = extract_tips(&reply);
                info!("Generated {} tips", tips.len());
                AdviceOutcome {
                    tips,
                    fallback: None,
                }
            }
            Err(err) => {
                let failure = AdviceFailure::classify(&err);
                warn!(%failure, "Advice provider failed, using fallback tips: {}", err);
                AdviceOutcome {
                    tips: fallback_tips(),
                    fallback: Some(failure),
                }
            }
        }
    }
}
