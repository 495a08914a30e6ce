use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use schoolday_api::middleware::error_handling::AppError;
use schoolday_core::errors::SchoolError;
use serde_json::json;
use sqlx::error::{DatabaseError, ErrorKind};
use std::borrow::Cow;

#[rstest]
#[case(SchoolError::NotFound("course".into()), StatusCode::NOT_FOUND)]
#[case(SchoolError::Validation("bad time".into()), StatusCode::BAD_REQUEST)]
#[case(SchoolError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(SchoolError::Rejected("refused".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(SchoolError::Remote { status: Some(500), body: json!({ "message": "upstream" }) }, StatusCode::BAD_GATEWAY)]
#[case(SchoolError::Database(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] err: SchoolError, #[case] expected: StatusCode) {
    let response = AppError(err).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_plain_report_maps_to_database_error() {
    let err = AppError::from(eyre::eyre!("connection refused"));

    assert!(matches!(err.0, SchoolError::Database(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_from_school_error_keeps_variant() {
    let err: AppError = SchoolError::Conflict("Monday 08:00 is taken".into()).into();

    assert!(matches!(err.0, SchoolError::Conflict(_)));
}

/// Stand-in for a Postgres error carrying a SQLSTATE code.
#[derive(Debug)]
struct PgStateError(&'static str);

impl std::fmt::Display for PgStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "database error {}", self.0)
    }
}

impl std::error::Error for PgStateError {}

impl DatabaseError for PgStateError {
    fn message(&self) -> &str {
        "constraint violated"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.0))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.0 {
            "23505" => ErrorKind::UniqueViolation,
            "23503" => ErrorKind::ForeignKeyViolation,
            _ => ErrorKind::Other,
        }
    }
}

fn sqlstate_report(code: &'static str) -> eyre::Report {
    eyre::Report::from(sqlx::Error::Database(Box::new(PgStateError(code))))
}

#[rstest]
#[case::duplicate_key("23505", StatusCode::CONFLICT)]
#[case::missing_reference("23503", StatusCode::NOT_FOUND)]
#[case::other_failure("40001", StatusCode::INTERNAL_SERVER_ERROR)]
fn test_constraint_violations_map_to_client_errors(
    #[case] code: &'static str,
    #[case] expected: StatusCode,
) {
    let err = AppError::from(sqlstate_report(code));

    assert_eq!(err.status(), expected);
    assert_eq!(err.into_response().status(), expected);
}
