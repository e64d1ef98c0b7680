use campus_lib::api::Resource;
use tablekit::detail::label_map;
use tablekit::{Column, Field};

use super::{DEPARTMENTS, PageSpec};

pub fn teachers() -> PageSpec {
    PageSpec {
        resource: Resource::teachers(),
        kind: "Teacher",
        title: "Teachers",
        subtitle: "Manage teacher records",
        columns: vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("department", "Department"),
            Column::new("teacherId", "Teacher ID"),
            Column::new("designation", "Designation"),
        ],
        create_fields: vec![
            Field::text("name", "Name").required(),
            Field::email("email", "Email").required(),
            Field::select("department", "Department", DEPARTMENTS).required(),
            Field::number("teacherId", "Teacher ID").required(),
            Field::text("designation", "Designation").required(),
        ],
        labels: label_map([
            ("name", "Name"),
            ("email", "Email"),
            ("department", "Department"),
            ("teacherId", "Teacher ID"),
            ("designation", "Designation"),
        ]),
        name_key: "name",
    }
}
