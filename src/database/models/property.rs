use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The five categories the public filter dropdown offers.
pub const PROPERTY_CATEGORIES: &[&str] =
    &["Residential", "Commercial", "Apartment", "Villa", "Office"];

pub const PROPERTY_STATUSES: &[&str] = &["Available", "Sold", "Rented", "Pending"];

/// Sort keys the listing endpoint accepts; everything else falls back to
/// `created_at`.
pub const PROPERTY_SORT_COLUMNS: &[&str] =
    &["created_at", "updated_at", "price", "views", "bedrooms", "area", "title"];

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    pub category: String,
    pub status: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: i32,
    pub year_built: Option<i32>,
    pub parking: Option<i32>,
    pub video: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
    pub furnished: bool,
    pub pet_friendly: bool,
    pub featured: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin-submitted payload for create and full update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    pub category: String,
    pub status: String,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub area: i32,
    pub year_built: Option<i32>,
    pub parking: Option<i32>,
    pub video: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub furnished: bool,
    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub featured: bool,
}

impl PropertyInput {
    /// Write-time validation; the schema itself enforces nothing beyond types.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.title.trim().len() < 3 {
            errors.push("Title must be at least 3 characters long".to_string());
        }
        if self.title.len() > 200 {
            errors.push("Title must not exceed 200 characters".to_string());
        }
        if self.price <= 0 {
            errors.push("Price must be a positive number".to_string());
        }
        if self.location.trim().len() < 3 {
            errors.push("Location must be at least 3 characters long".to_string());
        }
        if !PROPERTY_CATEGORIES.contains(&self.category.as_str()) {
            errors.push("Invalid property category".to_string());
        }
        if !PROPERTY_STATUSES.contains(&self.status.as_str()) {
            errors.push("Invalid property status".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> PropertyInput {
        PropertyInput {
            title: "Seaside Villa".to_string(),
            description: "A villa by the sea with a large garden.".to_string(),
            price: 450_000,
            location: "Marbella".to_string(),
            category: "Villa".to_string(),
            status: "Available".to_string(),
            bedrooms: 4,
            bathrooms: 3,
            area: 280,
            year_built: Some(2015),
            parking: Some(2),
            video: None,
            images: vec!["https://cdn.example.com/villa.jpg".to_string()],
            features: vec!["Garden".to_string()],
            amenities: vec!["Pool".to_string()],
            furnished: true,
            pet_friendly: false,
            featured: true,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(valid_input().validate().is_empty());
    }

    #[test]
    fn rejects_bad_category_and_price() {
        let mut input = valid_input();
        input.category = "Castle".to_string();
        input.price = 0;
        let errors = input.validate();
        assert!(errors.iter().any(|e| e.contains("category")));
        assert!(errors.iter().any(|e| e.contains("positive")));
    }

    #[test]
    fn serializes_camel_case() {
        let property = Property {
            id: Uuid::nil(),
            title: "T".into(),
            description: "D".into(),
            price: 1,
            location: "L".into(),
            category: "Villa".into(),
            status: "Available".into(),
            bedrooms: 1,
            bathrooms: 1,
            area: 10,
            year_built: None,
            parking: None,
            video: None,
            images: vec![],
            features: vec![],
            amenities: vec![],
            furnished: false,
            pet_friendly: true,
            featured: false,
            views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&property).unwrap();
        assert!(json.get("petFriendly").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("pet_friendly").is_none());
    }
}
