use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::lead::validation::{validate_field, FieldKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Business,
}

impl Field {
    /// Form order; the first entry receives focus when the modal opens.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Business];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Business => "business",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Email => FieldKind::Email,
            Field::Phone => FieldKind::Tel,
            Field::Name | Field::Business => FieldKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "Work email",
            Field::Phone => "Phone / WhatsApp",
            Field::Business => "Business name",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Jane Doe",
            Field::Email => "jane@company.com",
            Field::Phone => "(11) 91234-5678",
            Field::Business => "Acme Ltd.",
        }
    }
}

/// Per-field error text, keyed by field. Only failing fields have an entry.
pub type FieldErrors = BTreeMap<Field, String>;

/// Raw values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business: String,
}

impl LeadFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Business => &self.business,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Business => self.business = value,
        }
    }

    /// Runs every rule against the current values and collects the failures.
    pub fn validate(&self) -> FieldErrors {
        Field::ALL
            .iter()
            .filter_map(|&field| {
                let result = validate_field(self.get(field), field.kind(), Some(field.id()));
                (!result.is_valid).then(|| (field, result.error_message))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl FormSubmission {
    /// Builds the payload only when every field passes validation.
    pub fn from_fields(fields: &LeadFields, timestamp: DateTime<Utc>) -> Result<Self, FieldErrors> {
        let errors = fields.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            phone: fields.phone.trim().to_string(),
            business: fields.business.trim().to_string(),
            timestamp,
            source: config::LEAD_SOURCE.to_string(),
        })
    }
}

/// Always `YYYY-MM-DDTHH:MM:SS.sssZ`, whatever the clock's precision.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
