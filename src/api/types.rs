//! Request and response types for the REST API

use crate::services::{AddOutcome, DisplayRow};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response envelope
// ============================================================================

/// Standard API response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: None,
        }
    }

    pub fn success_with_message(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn success_with_data(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}

/// Placeholder payload for responses without data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empty {}

// ============================================================================
// Watchlist
// ============================================================================

/// Body of `POST /api/users/:user_id/watchlist`
#[derive(Debug, Clone, Deserialize)]
pub struct AddWatchlistRequest {
    pub stock_code: String,
}

/// Watchlist edit result followed by the refreshed rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AddOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    pub rows: Vec<DisplayRow>,
}

// ============================================================================
// Queries
// ============================================================================

/// `?query=` for search and autocomplete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// `?n=` for the chart endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    pub n: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::<Empty>::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "success" }));
    }

    #[test]
    fn test_error_envelope_can_carry_data() {
        let response = ApiResponse::error("Already on watchlist").with_data(vec![1, 2]);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
