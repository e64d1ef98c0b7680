use campus_lib::api::Resource;
use tablekit::detail::label_map;
use tablekit::{Column, Field};

use super::{DEPARTMENTS, PageSpec};

pub fn students() -> PageSpec {
    PageSpec {
        resource: Resource::students(),
        kind: "Student",
        title: "Students",
        subtitle: "Manage student records",
        columns: vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("department", "Department"),
            Column::new("registrationId", "Registration ID"),
            Column::new("age", "Age"),
        ],
        create_fields: vec![
            Field::text("name", "Name").required(),
            Field::email("email", "Email").required(),
            Field::select("department", "Department", DEPARTMENTS).required(),
            Field::number("registrationId", "Registration ID").required(),
            Field::number("age", "Age").required(),
        ],
        labels: label_map([
            ("name", "Name"),
            ("email", "Email"),
            ("department", "Department"),
            ("registrationId", "Registration ID"),
            ("age", "Age"),
        ]),
        name_key: "name",
    }
}
