use super::*;

#[test]
fn validate_credentials_trims_email_only() {
    assert_eq!(
        validate_credentials("  desk@clinic.test ", " secret "),
        Ok(("desk@clinic.test".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "secret"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_credentials("desk@clinic.test", ""), Err(MISSING_CREDENTIALS));
}

#[test]
fn rejected_sign_in_shows_service_message() {
    let error = AuthError::Rejected { status: 400, message: "Invalid login credentials".to_owned() };
    assert_eq!(sign_in_failed_message(&error), "Falha no login: Invalid login credentials");
}

#[test]
fn transport_failure_shows_generic_message() {
    let error = AuthError::Transport("offline".to_owned());
    assert_eq!(sign_in_failed_message(&error), format!("Falha no login: {BACKEND_UNAVAILABLE}"));
}
