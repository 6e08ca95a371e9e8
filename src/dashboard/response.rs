//! JSON envelopes and payloads shared by the API and its HTTP client

use std::collections::HashMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::GroupSummary;

/// `{ success, data?, error? }` envelope used by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// Payload of `GET /api/groups`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsOverview {
    pub groups: Vec<GroupSummary>,
    pub active_groups: HashMap<String, bool>,
}

/// Body of `POST /api/groups/{id}/toggle`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub active: bool,
}
