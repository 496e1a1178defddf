use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

/// Success body of the lists resource: `{ "list": <data> }`
#[derive(Debug)]
pub struct ListResponse {
    pub data: Value,
    pub status_code: StatusCode,
}

impl ListResponse {
    /// 200 OK with the given data
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
        }
    }

    /// 201 Created with the given data
    pub fn created(data: Value) -> Self {
        Self {
            data,
            status_code: StatusCode::CREATED,
        }
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(json!({ "list": self.data }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, crate::error::ApiError>;
