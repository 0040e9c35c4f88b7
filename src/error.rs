//! Error types and handling for the heat health assistant

use thiserror::Error;

/// Main error type for the heat health assistant
#[derive(Error, Debug)]
pub enum HeatHealthError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather provider could not resolve the requested city
    #[error("{message}")]
    CityNotFound { message: String },

    /// An upstream provider answered with a non-success status or could not be reached
    #[error("{provider} unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// An upstream provider answered with a payload we could not understand
    #[error("Malformed {provider} response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl HeatHealthError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn city_not_found<S: Into<String>>(message: S) -> Self {
        Self::CityNotFound {
            message: message.into(),
        }
    }

    pub fn unavailable<S: Into<String>>(
        provider: &'static str,
        status: Option<u16>,
        message: S,
    ) -> Self {
        Self::ProviderUnavailable {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(provider: &'static str, message: S) -> Self {
        Self::MalformedResponse {
            provider,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap a transport-level failure of an upstream call.
    ///
    /// The request URL is dropped: every provider carries its API key in the
    /// query string.
    pub fn transport(provider: &'static str, err: reqwest::Error) -> Self {
        Self::ProviderUnavailable {
            provider,
            status: err.status().map(|s| s.as_u16()),
            message: err.without_url().to_string(),
        }
    }

    /// HTTP status code the web layer answers with for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            HeatHealthError::Validation { .. } => 400,
            HeatHealthError::CityNotFound { .. } => 404,
            HeatHealthError::ProviderUnavailable { .. }
            | HeatHealthError::MalformedResponse { .. } => 502,
            HeatHealthError::Config { .. } => 500,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HeatHealthError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            HeatHealthError::CityNotFound { message } => message.clone(),
            HeatHealthError::ProviderUnavailable { provider, .. } => {
                format!("Unable to reach the {provider} service. Please try again later.")
            }
            HeatHealthError::MalformedResponse { provider, .. } => {
                format!("The {provider} service returned an unexpected response.")
            }
            HeatHealthError::Validation { message } => message.clone(),
        }
    }
}
