use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const INQUIRY_TYPES: &[&str] = &["property", "general"];

/// Flat status values; there is deliberately no transition graph, any value
/// is settable from any other.
pub const INQUIRY_STATUSES: &[&str] = &["new", "contacted", "resolved"];

pub const INQUIRY_SORT_COLUMNS: &[&str] = &["created_at", "status"];

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub property_id: Option<Uuid>,
    pub property_title: Option<String>,
    #[serde(rename = "type")]
    pub inquiry_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public contact-form payload. Only name, email and message are required;
/// everything else defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    pub property_id: Option<Uuid>,
    pub property_title: Option<String>,
    #[serde(rename = "type")]
    pub inquiry_type: Option<String>,
}

impl InquiryInput {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.push("Email is required".to_string());
        }
        if self.message.trim().is_empty() {
            errors.push("Message is required".to_string());
        }
        errors
    }

    /// Submission type, defaulting to "general" and rejecting unknowns back
    /// to the default rather than storing arbitrary strings.
    pub fn resolved_type(&self) -> &str {
        match self.inquiry_type.as_deref() {
            Some(t) if INQUIRY_TYPES.contains(&t) => t,
            _ => "general",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InquiryStatusUpdate {
    pub status: String,
}

impl InquiryStatusUpdate {
    pub fn validate(&self) -> Vec<String> {
        if INQUIRY_STATUSES.contains(&self.status.as_str()) {
            vec![]
        } else {
            vec![format!("Invalid inquiry status: {}", self.status)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_submission_is_valid() {
        let input: InquiryInput =
            serde_json::from_str(r#"{"name":"A","email":"a@b.com","message":"hello"}"#).unwrap();
        assert!(input.validate().is_empty());
        assert_eq!(input.phone, "");
        assert_eq!(input.resolved_type(), "general");
        assert!(input.property_id.is_none());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let input: InquiryInput = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        let errors = input.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("Name")));
        assert!(errors.iter().any(|e| e.contains("Message")));
    }

    #[test]
    fn unknown_type_falls_back_to_general() {
        let input: InquiryInput = serde_json::from_str(
            r#"{"name":"A","email":"a@b.com","message":"hi","type":"spam"}"#,
        )
        .unwrap();
        assert_eq!(input.resolved_type(), "general");

        let input: InquiryInput = serde_json::from_str(
            r#"{"name":"A","email":"a@b.com","message":"hi","type":"property"}"#,
        )
        .unwrap();
        assert_eq!(input.resolved_type(), "property");
    }

    #[test]
    fn status_update_rejects_unknown_values() {
        let update = InquiryStatusUpdate {
            status: "archived".to_string(),
        };
        assert!(!update.validate().is_empty());

        // Any known status can be set from any other; no transition graph.
        for status in INQUIRY_STATUSES {
            let update = InquiryStatusUpdate {
                status: status.to_string(),
            };
            assert!(update.validate().is_empty());
        }
    }

    #[test]
    fn type_field_serializes_as_type() {
        let inquiry = Inquiry {
            id: Uuid::nil(),
            name: "A".into(),
            email: "a@b.com".into(),
            phone: String::new(),
            message: "hello".into(),
            property_id: None,
            property_title: None,
            inquiry_type: "general".into(),
            status: "new".into(),
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(json["type"], "general");
        assert_eq!(json["status"], "new");
    }
}
