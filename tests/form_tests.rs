//! End-to-end form validation flows.

use formwise::constraints::{ConstraintKind, IntRange, ViolationKind};
use formwise::registry::FormSpec;
use formwise::values::{PlainValue, UploadDescriptor, UploadErrorCode};
use formwise::{Field, Form, Value};
use std::collections::HashMap;

fn no_input() -> HashMap<String, PlainValue> {
    HashMap::new()
}

fn upload(mime_type: &str) -> UploadDescriptor {
    UploadDescriptor::received("file", mime_type, 100, "/tmp/php123")
}

#[test]
fn empty_input_flags_required_field() {
    let mut form = Form::new([Field::text("name").required()]);
    form.assign(no_input());

    assert!(!form.is_valid());
    assert_eq!(
        form.violation("name").unwrap().kind,
        ViolationKind::MissingValue
    );
}

#[test]
fn reset_restores_defaults_and_clears_violations() {
    let mut form = Form::new([
        Field::text("name").required(),
        Field::multi_select("tags", ["a", "b"]),
        Field::file_with_validator("cv", |_| true),
    ]);
    form.assign([
        ("name", PlainValue::from("")),
        ("tags", PlainValue::from(vec!["a"])),
        ("cv", PlainValue::from(upload("application/pdf"))),
    ]);
    assert!(!form.is_valid());

    form.reset();

    let values = form.values();
    assert_eq!(values["name"], PlainValue::from(""));
    assert_eq!(values["tags"], PlainValue::List(Vec::new()));
    assert_eq!(values["cv"], PlainValue::from(UploadDescriptor::default()));
    assert!(form.violations().is_empty());
}

#[test]
fn confirmation_must_match_password() {
    let mut password = Field::password("password");
    password.assign("secret1").unwrap();
    let mut confirm = Field::password("confirm").matches(&password);

    confirm.assign("secret1").unwrap();
    assert!(confirm.is_valid());

    confirm.assign("secret2").unwrap();
    assert!(!confirm.is_valid());
    assert_eq!(
        confirm.violation().unwrap().kind,
        ViolationKind::InvalidValue
    );

    confirm.assign("").unwrap();
    assert!(confirm.is_valid());
}

#[test]
fn confirmation_inside_a_form() {
    let password = Field::password("password").required();
    let confirm = Field::password("confirm").matches(&password);
    let mut form = Form::new([password, confirm]);

    form.assign([("password", "secret1"), ("confirm", "secret1")]);
    assert!(form.is_valid());

    form.assign([("password", "secret1"), ("confirm", "secret2")]);
    assert!(!form.is_valid());
    assert_eq!(
        form.violation("confirm").unwrap().constraint_kind(),
        ConstraintKind::Matches
    );

    form.assign([("password", "secret1")]);
    assert!(form.is_valid());
}

#[test]
fn replacing_the_referenced_field_breaks_the_match() {
    let password = Field::password("password");
    let confirm = Field::password("confirm").matches(&password);
    let mut form = Form::new([password, confirm]);

    form.set_field(Field::password("password"));
    form.assign([("password", "secret1"), ("confirm", "secret1")]);

    assert!(!form.is_valid());
    assert!(form.has_violation("confirm"));
}

#[test]
fn mime_type_accepts_super_type() {
    let mut field = Field::file_with_validator("avatar", |_| true)
        .mime_type(["image"])
        .unwrap();

    field.assign(upload("image/png")).unwrap();
    assert!(field.is_valid());

    field.assign(upload("application/pdf")).unwrap();
    assert!(!field.is_valid());
    assert_eq!(field.violation().unwrap().kind, ViolationKind::InvalidValue);

    field.assign(upload("not-a-mime-pattern")).unwrap();
    assert!(!field.is_valid());
    assert_eq!(field.violation().unwrap().kind, ViolationKind::InvalidValue);
}

#[test]
fn upload_transport_failures_are_classified() {
    let mut field = Field::file_with_validator("cv", |_| true);

    for (code, expected) in [
        (1, ViolationKind::Configuration),
        (2, ViolationKind::Configuration),
        (3, ViolationKind::SystemState),
        (6, ViolationKind::SystemState),
        (7, ViolationKind::SystemState),
        (8, ViolationKind::Configuration),
        (42, ViolationKind::SystemState),
    ] {
        field
            .assign(upload("text/plain").with_error(UploadErrorCode::from(code)))
            .unwrap();
        assert!(!field.is_valid());
        assert_eq!(field.violation().unwrap().kind, expected, "code {code}");
    }

    field
        .assign(UploadDescriptor::named("").with_error(UploadErrorCode::NoFile))
        .unwrap();
    assert!(field.is_valid());
}

#[test]
fn default_upload_predicate_requires_a_real_file() {
    let mut field = Field::file("cv");
    field
        .assign(UploadDescriptor::received(
            "cv.pdf",
            "application/pdf",
            10,
            "/nonexistent/formwise/upload",
        ))
        .unwrap();

    assert!(!field.is_valid());
    assert_eq!(
        field.violation().unwrap().constraint_kind(),
        ConstraintKind::UploadedFile
    );
}

#[test]
fn decoded_request_body_drives_the_form() {
    let mut form = Form::new([
        Field::text("age").required().int(IntRange::new().min(18).max(130)),
        Field::checkbox("newsletter"),
        Field::multi_select("languages", [("en", "English"), ("de", "Deutsch")]),
        Field::file_with_validator("photo", |temp| temp.starts_with("/tmp/")),
        Field::text("website").honey_pot(),
    ]);

    let body: HashMap<String, PlainValue> = serde_json::from_str(
        r#"{
            "age": "42",
            "newsletter": "yes",
            "languages": ["en", "de"],
            "photo": {"name": "me.jpg", "type": "image/jpeg", "size": 2048,
                      "tmp_name": "/tmp/php123", "error": 0}
        }"#,
    )
    .unwrap();
    form.assign(body);

    assert!(form.is_valid(), "{:?}", form.violations());
    assert!(form.field("newsletter").unwrap().is_checked());
    assert_eq!(
        form.field("photo").unwrap().file_name().as_deref(),
        Some("me.jpg")
    );

    form.assign([
        ("age", PlainValue::from("17")),
        ("languages", PlainValue::from(vec!["en", "fr"])),
        ("website", PlainValue::from("http://spam.example")),
    ]);
    assert!(!form.is_valid());
    let failed: Vec<&str> = form.violations().keys().map(String::as_str).collect();
    assert_eq!(failed, ["age", "languages", "website"]);
    assert_eq!(
        form.violation("website").unwrap().kind,
        ViolationKind::Security
    );
}

#[test]
fn values_and_violations_serialize() {
    let mut form = Form::new([Field::text("name").required(), Field::multi_select("tags", ["a"])]);
    form.assign([("tags", vec!["a"])]);
    form.is_valid();

    let values = serde_json::to_value(form.values()).unwrap();
    assert_eq!(values, serde_json::json!({"name": "", "tags": ["a"]}));

    let violations = serde_json::to_value(form.violations()).unwrap();
    assert_eq!(violations["name"]["kind"], "missing_value");
    assert_eq!(violations["name"]["constraint"], "required");
}

#[test]
fn typed_values_must_fit_the_field() {
    let mut form = Form::new([Field::checkbox("terms")]);
    let terms = form.field_mut("terms").unwrap();

    assert!(terms.assign(Value::list(["1"])).is_err());
    assert!(terms.assign(Value::scalar("1")).is_ok());
}

#[test]
fn described_form_matches_hand_built_form() {
    let spec = FormSpec::from_json(
        r#"{"fields": [
            {"name": "username", "kind": "text",
             "constraints": [{"rule": "required"}, {"rule": "min_length", "length": 6}]},
            {"name": "role", "kind": "radio", "options": ["admin", "user"]}
        ]}"#,
    )
    .unwrap();
    let mut built = spec.build().unwrap();
    let mut manual = Form::new([
        Field::text("username").required().min_length(6),
        Field::radio("role", ["admin", "user"]),
    ]);

    for input in [
        vec![("username", "wumbo"), ("role", "user")],
        vec![("username", "wumbology"), ("role", "root")],
        vec![("username", "wumbology"), ("role", "admin")],
    ] {
        built.assign(input.clone());
        manual.assign(input);
        assert_eq!(built.is_valid(), manual.is_valid());
        assert_eq!(built.violations(), manual.violations());
    }
}
