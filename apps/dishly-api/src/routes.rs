use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dishly_service::{
	ListDishListsRequest, ListDishListsResponse, SearchRequest, SearchResponse, ServiceError,
};

use crate::state::AppState;

const USER_ID_HEADER: &str = "x-dishly-user-id";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", get(search))
		.route("/v1/dishlists", get(list_dishlists))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct SearchParams {
	#[serde(default)]
	q: String,
	tab: Option<String>,
	cursor: Option<String>,
	limit: Option<String>,
}

async fn search(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
	let requester_id = requester_id(&headers)?;
	let response = state
		.service
		.search(SearchRequest {
			requester_id,
			query: params.q,
			tab: params.tab,
			cursor: params.cursor,
			limit: params.limit,
		})
		.await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ListParams {
	filter: Option<String>,
}

async fn list_dishlists(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(params): Query<ListParams>,
) -> Result<Json<ListDishListsResponse>, ApiError> {
	let requester_id = requester_id(&headers)?;
	let response = state
		.service
		.list_dishlists(ListDishListsRequest { requester_id, filter: params.filter })
		.await?;

	Ok(Json(response))
}

/// Identity verification lives in front of this service; handlers trust the
/// user id header the gateway injects.
fn requester_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
	let raw = headers.get(USER_ID_HEADER).and_then(|value| value.to_str().ok()).ok_or_else(|| {
		json_error(StatusCode::UNAUTHORIZED, "missing_user", "X-Dishly-User-Id header is required.")
	})?;

	Uuid::parse_str(raw.trim()).map_err(|_| {
		json_error(
			StatusCode::BAD_REQUEST,
			"invalid_user",
			"X-Dishly-User-Id header must be a UUID.",
		)
	})
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError { status, error_code: code.to_string(), message: message.into() }
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure while serving a request.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage",
					"Search is temporarily unavailable.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
