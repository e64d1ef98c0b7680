use campus_lib::model::{Record, Value};
use tablekit::form::{FormEvent, FormModal};
use tablekit::schema::disable_field;
use tablekit::{EventResult, Field, Key, Modifiers};

fn student_fields() -> Vec<Field> {
    vec![
        Field::text("name", "Name").required(),
        Field::email("email", "Email").required(),
        Field::select("department", "Department", ["CSE", "BBA", "MBA"]).required(),
        Field::number("registrationId", "Registration ID").required(),
        Field::number("age", "Age").required(),
    ]
}

#[test]
fn test_edit_form_seeds_and_clears_numbers_to_empty_string() {
    let fields = vec![Field::text("name", "Name"), Field::number("age", "Age")];
    let mut form = FormModal::new("Edit", fields);
    form.open(Some(&Record::new().set("name", "Ada").set("age", 30)));

    let copy = form.working_copy();
    assert_eq!(copy.value("name"), &Value::from("Ada"));
    assert_eq!(copy.value("age"), &Value::Int(30));

    form.set_text("age", "");
    let copy = form.working_copy();
    assert_eq!(copy.value("name"), &Value::from("Ada"));
    assert_eq!(copy.value("age"), &Value::from(""));
}

#[test]
fn test_create_form_with_empty_required_field_does_not_submit() {
    let mut form = FormModal::new("Add Student", student_fields());
    form.open(None);
    form.set_text("name", "Ada");
    form.set_text("email", "ada@example.com");
    form.select("department", "CSE");
    form.set_text("registrationId", "1001");

    assert!(form.submit(false).is_none());
    assert_eq!(
        form.errors().get("age").map(String::as_str),
        Some("Age is required")
    );

    form.set_text("age", "20");
    let payload = form.submit(false).expect("complete form submits");
    assert_eq!(payload.len(), 5);
    assert_eq!(payload.value("registrationId"), &Value::Int(1001));
}

#[test]
fn test_invalid_email_blocks_submit() {
    let mut form = FormModal::new("Add", vec![Field::email("email", "Email").required()]);
    form.open(None);
    form.set_text("email", "not-an-email");
    assert!(form.submit(false).is_none());
    form.set_text("email", "ada@example.com");
    assert!(form.submit(false).is_some());
}

#[test]
fn test_edit_schema_locks_identifier_but_submits_it() {
    let fields = disable_field(&student_fields(), "registrationId");
    let mut form = FormModal::new("Edit Student", fields);
    let initial = Record::new()
        .set("name", "Ada")
        .set("email", "ada@example.com")
        .set("department", "CSE")
        .set("registrationId", 1001)
        .set("age", 20);
    form.open(Some(&initial));

    assert!(!form.set_text("registrationId", "2"));
    let payload = form.submit(false).expect("valid");
    assert_eq!(payload.value("registrationId"), &Value::Int(1001));
    assert_eq!(form.view(false).expect("open").submit.label, "Update");
}

#[test]
fn test_keyboard_flow_produces_submit_event() {
    let fields = vec![Field::text("name", "Name").required(), Field::number("age", "Age")];
    let mut form = FormModal::new("Add", fields);
    form.open(None);

    for c in "Ada".chars() {
        form.handle_key(Key::Char(c), Modifiers::new(), false);
    }
    form.handle_key(Key::Tab, Modifiers::new(), false);
    for c in "3a1".chars() {
        form.handle_key(Key::Char(c), Modifiers::new(), false);
    }

    match form.handle_key(Key::Enter, Modifiers::new(), false) {
        EventResult::Event(FormEvent::Submit(record)) => {
            assert_eq!(record.value("name"), &Value::from("Ada"));
            assert_eq!(record.value("age"), &Value::Int(31));
        }
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn test_unparseable_number_is_flagged() {
    let mut form = FormModal::new("Add", vec![Field::number("age", "Age")]);
    form.open(None);
    form.set_text("age", "-");
    assert_eq!(form.working_copy().value("age"), &Value::from(""));
    assert!(form.submit(false).is_none());
    assert_eq!(
        form.errors().get("age").map(String::as_str),
        Some("Enter a number")
    );
}
