//! Signup Form
//!
//! This example validates a signup form the way a request handler would.
//!
//! Key concepts:
//! - Fluent rule attachment on fields
//! - First failing rule per field, all failing fields per form
//! - Recovering rule parameters from a violation
//! - Building the same form from a JSON description
//!
//! Run with: cargo run --example signup_form

use formwise::constraints::{FieldViolation, IntRange, MinLengthConstraint};
use formwise::{Field, Form, FormSpec, PlainValue};
use stillwater::validation::Validation;

fn signup_form() -> Form {
    let password = Field::password("password").required().min_length(8);
    let confirm = Field::password("confirm").matches(&password);

    Form::new([
        Field::text("username")
            .required()
            .min_length(3)
            .max_length(16)
            .regexp("^[a-z0-9_]+$")
            .expect("pattern is valid"),
        Field::text("email").required().email(),
        password,
        confirm,
        Field::text("age").int(IntRange::new().min(13)),
        Field::multi_select("topics", [("rust", "Rust"), ("web", "Web")]),
        Field::checkbox("terms").required(),
        Field::text("website").honey_pot(),
    ])
}

fn main() {
    println!("=== Signup Form Example ===\n");

    // Example 1: A clean submission
    println!("Example 1: Valid Submission");
    let mut form = signup_form();
    form.assign([
        ("username", PlainValue::from("ferris")),
        ("email", PlainValue::from("ferris@example.org")),
        ("password", PlainValue::from("crabs-rule")),
        ("confirm", PlainValue::from("crabs-rule")),
        ("age", PlainValue::from("21")),
        ("topics", PlainValue::from(vec!["rust"])),
        ("terms", PlainValue::from("on")),
    ]);
    println!("  Valid: {}", form.is_valid());
    println!("  Terms accepted: {}", form.field("terms").is_some_and(Field::is_checked));
    println!();

    // Example 2: Every failing field is reported once
    println!("Example 2: Invalid Submission");
    form.reset();
    form.assign([
        ("username", PlainValue::from("Ferris!")),
        ("email", PlainValue::from("ferris@")),
        ("password", PlainValue::from("short")),
        ("confirm", PlainValue::from("shorter")),
        ("age", PlainValue::from("9")),
        ("topics", PlainValue::from(vec!["rust", "cobol"])),
        ("website", PlainValue::from("http://spam.example")),
    ]);
    println!("  Valid: {}", form.is_valid());
    for (name, violation) in form.violations() {
        println!("  ✗ {name}: {violation}");
    }
    println!();

    // Example 3: Parameters of the rule that failed
    println!("Example 3: Inspecting the Failing Rule");
    if let Some(rule) = form
        .violation("password")
        .and_then(|violation| violation.rule::<MinLengthConstraint>())
    {
        println!("  Password needs at least {} bytes", rule.min_length());
    }
    println!();

    // Example 4: Accumulated failures
    println!("Example 4: Accumulating with Validation");
    match form.validate() {
        Validation::Success(()) => println!("  ✓ All fields valid"),
        Validation::Failure(errors) => {
            let failed: Vec<&FieldViolation> = errors.iter().collect();
            println!("  ✗ {} fields failed", failed.len());
            for error in failed {
                println!("    - {} ({})", error.field, error.violation.kind);
            }
        }
    }
    println!();

    // Example 5: The same rules from a JSON description
    println!("Example 5: Form From JSON");
    let spec = FormSpec::from_json(
        r#"{"fields": [
            {"name": "username", "kind": "text",
             "constraints": [{"rule": "required"}, {"rule": "min_length", "length": 3}]},
            {"name": "email", "kind": "text",
             "constraints": [{"rule": "required"}, {"rule": "email"}]}
        ]}"#,
    );
    match spec.and_then(|spec| spec.build()) {
        Ok(mut form) => {
            form.assign([("username", "fe"), ("email", "ferris@example.org")]);
            println!("  Valid: {}", form.is_valid());
            match serde_json::to_string(form.violations()) {
                Ok(json) => println!("  Violations: {json}"),
                Err(error) => println!("  ✗ {error}"),
            }
        }
        Err(error) => println!("  ✗ {error}"),
    }

    println!("\n=== Example Complete ===");
}
