pub type ServiceResult<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for ServiceError {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<dishly_storage::Error> for ServiceError {
	fn from(err: dishly_storage::Error) -> Self {
		match err {
			dishly_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			dishly_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			dishly_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
