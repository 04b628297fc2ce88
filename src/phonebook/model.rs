use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// The columns of a record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    FirstName,
    LastName,
    MiddleName,
    Company,
    WorkPhone,
    PersonalPhone,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::MiddleName,
        Field::Company,
        Field::WorkPhone,
        Field::PersonalPhone,
    ];

    /// Fields a user fills in; the identifier is always assigned by the store.
    pub const EDITABLE: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::MiddleName,
        Field::Company,
        Field::WorkPhone,
        Field::PersonalPhone,
    ];

    /// Column name as written in the header row.
    ///
    /// These match the files produced by earlier releases, so existing
    /// phonebooks keep loading.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Id => "ИД",
            Field::FirstName => "Имя",
            Field::LastName => "Фамилия",
            Field::MiddleName => "Отчество",
            Field::Company => "Компания",
            Field::WorkPhone => "Рабочий номер",
            Field::PersonalPhone => "Личный номер",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "Id",
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::MiddleName => "Middle name",
            Field::Company => "Company",
            Field::WorkPhone => "Work number",
            Field::PersonalPhone => "Personal number",
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Field::WorkPhone | Field::PersonalPhone)
    }

    /// Whether an empty value is acceptable when creating a record.
    pub fn is_optional(&self) -> bool {
        matches!(self, Field::MiddleName)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fields that are edited together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    Name,
    Company,
    Phone,
}

impl FieldGroup {
    pub fn fields(&self) -> &'static [Field] {
        match self {
            FieldGroup::Name => &[Field::FirstName, Field::LastName, Field::MiddleName],
            FieldGroup::Company => &[Field::Company],
            FieldGroup::Phone => &[Field::WorkPhone, Field::PersonalPhone],
        }
    }

    /// In skippable groups an empty answer keeps the current value.
    pub fn allows_skip(&self) -> bool {
        !matches!(self, FieldGroup::Company)
    }
}

impl std::str::FromStr for FieldGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "name" => Ok(FieldGroup::Name),
            "2" | "company" => Ok(FieldGroup::Company),
            "3" | "phone" => Ok(FieldGroup::Phone),
            other => Err(format!("Unknown field group: {}", other)),
        }
    }
}

/// A partial update: only the fields present are changed.
pub type FieldMap = BTreeMap<Field, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub company: String,
    pub work_phone: String,
    pub personal_phone: String,
}

impl Record {
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Id => Cow::Owned(self.id.to_string()),
            Field::FirstName => Cow::Borrowed(&self.first_name),
            Field::LastName => Cow::Borrowed(&self.last_name),
            Field::MiddleName => Cow::Borrowed(&self.middle_name),
            Field::Company => Cow::Borrowed(&self.company),
            Field::WorkPhone => Cow::Borrowed(&self.work_phone),
            Field::PersonalPhone => Cow::Borrowed(&self.personal_phone),
        }
    }

    /// Overwrites a text field. The identifier is not settable this way.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        let slot = match field {
            Field::Id => return false,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::MiddleName => &mut self.middle_name,
            Field::Company => &mut self.company,
            Field::WorkPhone => &mut self.work_phone,
            Field::PersonalPhone => &mut self.personal_phone,
        };
        *slot = value;
        true
    }

    pub fn full_name(&self) -> String {
        [&self.first_name, &self.last_name, &self.middle_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All field values joined by spaces, used for free-text matching.
    pub fn search_text(&self) -> String {
        Field::ALL
            .iter()
            .map(|f| self.value(*f))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A record before the store has given it an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub company: String,
    pub work_phone: String,
    pub personal_phone: String,
}

impl NewRecord {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Id => {}
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::MiddleName => self.middle_name = value,
            Field::Company => self.company = value,
            Field::WorkPhone => self.work_phone = value,
            Field::PersonalPhone => self.personal_phone = value,
        }
    }

    pub fn into_record(self, id: u64) -> Record {
        Record {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            company: self.company,
            work_phone: self.work_phone,
            personal_phone: self.personal_phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        NewRecord {
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            middle_name: String::new(),
            company: "Acme".into(),
            work_phone: "84951234567".into(),
            personal_phone: "71234567890".into(),
        }
        .into_record(3)
    }

    #[test]
    fn full_name_skips_empty_middle_name() {
        assert_eq!(sample().full_name(), "Ivan Petrov");
    }

    #[test]
    fn id_is_not_settable() {
        let mut record = sample();
        assert!(!record.set(Field::Id, "9".into()));
        assert_eq!(record.id, 3);
        assert!(record.set(Field::Company, "Globex".into()));
        assert_eq!(record.company, "Globex");
    }

    #[test]
    fn search_text_includes_every_field() {
        let text = sample().search_text();
        assert!(text.starts_with("3 Ivan"));
        assert!(text.contains("71234567890"));
    }

    #[test]
    fn field_groups_parse_from_menu_input() {
        assert_eq!("1".parse::<FieldGroup>().unwrap(), FieldGroup::Name);
        assert_eq!("Phone".parse::<FieldGroup>().unwrap(), FieldGroup::Phone);
        assert!("4".parse::<FieldGroup>().is_err());
    }
}
