use super::*;

fn sample_fields() -> PatientFields {
    PatientFields {
        name: "Ana Souza".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "+55 11 99999-0000".to_owned(),
        procedure: "Limpeza".to_owned(),
    }
}

// =============================================================
// PatientId
// =============================================================

#[test]
fn patient_id_accepts_integer_json() {
    let id: PatientId = serde_json::from_str("42").unwrap();
    assert_eq!(id.as_str(), "42");
}

#[test]
fn patient_id_accepts_uuid_string_json() {
    let id: PatientId = serde_json::from_str("\"7d3f0c1e-7a4b-4a59-9a43-0b1b5b3f0c11\"").unwrap();
    assert_eq!(id.as_str(), "7d3f0c1e-7a4b-4a59-9a43-0b1b5b3f0c11");
}

#[test]
fn patient_id_rejects_fractional_and_empty_values() {
    assert!(serde_json::from_str::<PatientId>("1.5").is_err());
    assert!(serde_json::from_str::<PatientId>("\"\"").is_err());
    assert!(serde_json::from_str::<PatientId>("null").is_err());
}

#[test]
fn patient_id_serializes_as_plain_string() {
    assert_eq!(serde_json::to_string(&PatientId::new("9")).unwrap(), "\"9\"");
}

// =============================================================
// PatientFields
// =============================================================

#[test]
fn set_then_get_touches_only_that_field() {
    let mut fields = PatientFields::default();
    fields.set(PatientField::Phone, "123".to_owned());
    assert_eq!(fields.get(PatientField::Phone), "123");
    assert_eq!(fields.get(PatientField::Name), "");
    assert_eq!(fields.get(PatientField::Email), "");
    assert_eq!(fields.get(PatientField::Procedure), "");
}

#[test]
fn first_missing_follows_form_order() {
    let mut fields = sample_fields();
    assert_eq!(fields.first_missing(), None);

    fields.procedure.clear();
    fields.email = "   ".to_owned();
    assert_eq!(fields.first_missing(), Some(PatientField::Email));
}

#[test]
fn fields_serialize_with_column_names() {
    let json = serde_json::to_value(sample_fields()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ana Souza",
            "email": "ana@example.com",
            "phone": "+55 11 99999-0000",
            "procedure": "Limpeza",
        })
    );
}

#[test]
fn only_email_uses_email_input() {
    for field in PatientField::ALL {
        let expected = if field == PatientField::Email { "email" } else { "text" };
        assert_eq!(field.input_type(), expected);
    }
}

// =============================================================
// FormDraft
// =============================================================

#[test]
fn draft_load_copies_fields_and_id() {
    let patient = Patient { id: PatientId::new("3"), fields: sample_fields(), created_at: "t".to_owned() };
    let mut draft = FormDraft::default();
    draft.load(&patient);
    assert!(draft.is_editing());
    assert_eq!(draft.fields, patient.fields);
    assert_eq!(draft.editing_id, Some(PatientId::new("3")));
}

#[test]
fn draft_clear_resets_everything() {
    let mut draft = FormDraft { fields: sample_fields(), editing_id: Some(PatientId::new("1")) };
    draft.clear();
    assert_eq!(draft, FormDraft::default());
    assert!(!draft.is_editing());
}
