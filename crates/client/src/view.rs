use std::fmt::Write;

use common::types::RegistrationRecord;

pub const EMPTY_LIST: &str = "No records found!";
pub const LOADING: &str = "Loading...";

/// Plain-text list, one block per record. An empty list renders [`EMPTY_LIST`].
pub fn render_records(records: &[RegistrationRecord]) -> String {
    if records.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let mut out = String::new();
    for (i, r) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "CPF: {}", r.cpf);
        let _ = writeln!(out, "Name: {}", r.name);
        let _ = writeln!(out, "Age: {}", r.age);
        let _ = writeln!(out, "Postal code: {}", r.postal_code);
        let _ = writeln!(out, "Address: {}", r.address);
    }
    out
}

/// The list area: a spinner stand-in while loading, the records otherwise.
pub fn render_list(loading: bool, records: &[RegistrationRecord]) -> String {
    if loading {
        LOADING.to_string()
    } else {
        render_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_explicit_indicator() {
        assert_eq!(render_records(&[]), "No records found!");
        assert_eq!(render_list(true, &[]), "Loading...");
    }

    #[test]
    fn records_render_every_field() {
        let r = RegistrationRecord {
            cpf: "12345678900".into(),
            name: "Ana".into(),
            age: "30".into(),
            postal_code: "01001000".into(),
            address: "Praça da Sé, Sé, São Paulo - SP".into(),
        };
        let text = render_records(&[r.clone(), r]);
        assert!(text.starts_with("CPF: 12345678900\nName: Ana\nAge: 30\n"));
        assert!(text.contains("Address: Praça da Sé, Sé, São Paulo - SP\n"));
        assert_eq!(text.matches("CPF:").count(), 2);
    }
}
