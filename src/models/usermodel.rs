use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Mechanic,
    FuelDelivery,
    MedicalAid,
    User,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Mechanic => "mechanic",
            UserRole::FuelDelivery => "fuel_delivery",
            UserRole::MedicalAid => "medical_aid",
            UserRole::User => "user",
        }
    }

    /// Roles that may hold a service provider record.
    pub fn is_provider(&self) -> bool {
        matches!(
            self,
            UserRole::Mechanic | UserRole::FuelDelivery | UserRole::MedicalAid
        )
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub blocked: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roles() {
        assert!(UserRole::Mechanic.is_provider());
        assert!(UserRole::FuelDelivery.is_provider());
        assert!(UserRole::MedicalAid.is_provider());
        assert!(!UserRole::User.is_provider());
        assert!(!UserRole::Admin.is_provider());
    }

    #[test]
    fn test_role_to_str() {
        assert_eq!(UserRole::FuelDelivery.to_str(), "fuel_delivery");
        assert_eq!(UserRole::Admin.to_str(), "admin");
    }
}
