use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, ValueObject};

/// Who ordered, any free-text notes, and whether the order is expedited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct CustomerInfo {
    name: String,
    notes: String,
    priority: bool,
}

#[derive(Deserialize)]
struct CustomerRecord {
    name: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    priority: bool,
}

impl TryFrom<CustomerRecord> for CustomerInfo {
    type Error = DomainError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.notes, record.priority)
    }
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, notes: impl Into<String>, priority: bool) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        Ok(Self {
            name,
            notes: notes.into(),
            priority,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_priority(&self) -> bool {
        self.priority
    }
}

impl ValueObject for CustomerInfo {}

impl core::fmt::Display for CustomerInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.priority {
            write!(f, "{} (priority)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(
            CustomerInfo::new("  ", "", false),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn customer_info_is_compared_by_value() {
        let a = CustomerInfo::new("Acme | Jane Doe", "gift wrap", true).unwrap();
        let b = CustomerInfo::new("Acme | Jane Doe", "gift wrap", true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Acme | Jane Doe (priority)");
        assert_eq!(a.notes(), "gift wrap");
    }

    #[test]
    fn deserialization_rejects_blank_names() {
        let json = r#"{"name":"   ","notes":"","priority":false}"#;
        assert!(serde_json::from_str::<CustomerInfo>(json).is_err());

        let info: CustomerInfo = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(info, CustomerInfo::new("Acme", "", false).unwrap());
    }
}
