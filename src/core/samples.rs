//! Starter records used to seed an empty store

use crate::core::data::StudentFields;
use chrono::NaiveDate;

fn sample(
    admission_id: &str,
    full_name: &str,
    address: &str,
    birthday: (i32, u32, u32),
    admitted: (i32, u32, u32),
    guardian_name: &str,
    guardian_contact: &str,
) -> StudentFields {
    StudentFields {
        admission_id: Some(admission_id.to_string()),
        full_name: Some(full_name.to_string()),
        address: Some(address.to_string()),
        birthday: NaiveDate::from_ymd_opt(birthday.0, birthday.1, birthday.2),
        admission_date: NaiveDate::from_ymd_opt(admitted.0, admitted.1, admitted.2),
        guardian_name: Some(guardian_name.to_string()),
        guardian_contact: Some(guardian_contact.to_string()),
    }
}

pub fn sample_students() -> Vec<StudentFields> {
    vec![
        sample(
            "ADM-2023-001",
            "Eleanor Vance",
            "42 Hill House, New England",
            (2008, 4, 12),
            (2023, 1, 15),
            "Theodora Vance",
            "555-019-2834",
        ),
        sample(
            "ADM-2023-002",
            "Luke Crain",
            "891 Oak Lane, Springfield",
            (2009, 11, 20),
            (2023, 1, 16),
            "Steven Crain",
            "555-827-1092",
        ),
        sample(
            "ADM-2024-001",
            "Shirley Crain",
            "102 Maple Street, Boston",
            (2010, 6, 5),
            (2024, 2, 10),
            "Hugh Crain",
            "555-332-9011",
        ),
    ]
}
