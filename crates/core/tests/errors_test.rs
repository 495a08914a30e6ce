use pretty_assertions::assert_eq;
use rstest::rstest;
use schoolday_core::errors::{SchoolError, SchoolResult, extract_message};
use serde_json::{Value, json};
use std::error::Error;

#[test]
fn test_school_error_display() {
    let not_found = SchoolError::NotFound("Course not found".to_string());
    let validation = SchoolError::Validation("Invalid input".to_string());
    let conflict = SchoolError::Conflict("Cell taken".to_string());
    let rejected = SchoolError::Rejected("Teacher busy".to_string());
    let database = SchoolError::Database(eyre::eyre!("Database connection failed"));
    let internal = SchoolError::Internal(Box::new(std::io::Error::other("Internal error")));

    assert_eq!(not_found.to_string(), "Resource not found: Course not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(conflict.to_string(), "Conflict: Cell taken");
    assert_eq!(rejected.to_string(), "Rejected by backend: Teacher busy");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_remote_error_display_uses_extracted_message() {
    let remote = SchoolError::Remote {
        status: Some(422),
        body: json!({ "message": "Section is archived" }),
    };
    assert_eq!(remote.to_string(), "Remote error: Section is archived");

    let opaque = SchoolError::Remote {
        status: None,
        body: json!({ "code": 17 }),
    };
    assert_eq!(opaque.to_string(), "Remote error: unknown error");
}

#[test]
fn test_error_source() {
    let time_error = SchoolError::Internal(Box::new(std::io::Error::other("IO error")));
    assert!(time_error.source().is_some());
}

#[test]
fn test_school_result() {
    let result: SchoolResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: SchoolResult<i32> = Err(SchoolError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[rstest]
#[case(json!({ "response": { "data": { "message": "Nested", "details": "Other" } }, "message": "Top" }), Some("Nested"))]
#[case(json!({ "response": { "data": { "details": "Only details" } }, "message": "Top" }), Some("Only details"))]
#[case(json!({ "response": { "data": {} }, "message": "Top level" }), Some("Top level"))]
#[case(json!({ "details": ["code required", "name required"] }), Some("code required; name required"))]
#[case(json!({ "error": "Resource not found: course" }), Some("Resource not found: course"))]
#[case(json!({ "message": "   ", "error": "Fallback to error" }), Some("Fallback to error"))]
#[case(json!({ "message": 42 }), None)]
#[case(json!("plain string body"), None)]
fn test_extract_message(#[case] body: Value, #[case] expected: Option<&str>) {
    assert_eq!(extract_message(&body).as_deref(), expected);
}

#[test]
fn test_user_message_fallback() {
    let database = SchoolError::Database(eyre::eyre!("connection reset"));
    assert_eq!(database.user_message("Something went wrong"), "Something went wrong");

    let blank = SchoolError::Rejected("  ".to_string());
    assert_eq!(blank.user_message("Save failed"), "Save failed");

    let validation = SchoolError::Validation("Start time must be before end time".to_string());
    assert_eq!(
        validation.user_message("Save failed"),
        "Start time must be before end time"
    );

    let remote = SchoolError::Remote {
        status: Some(400),
        body: json!({ "response": { "data": { "message": "Duplicate course code" } } }),
    };
    assert_eq!(remote.user_message("Save failed"), "Duplicate course code");
}
