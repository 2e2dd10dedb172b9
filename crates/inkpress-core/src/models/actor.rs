use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the acting user, supplied by the identity collaborator.
/// The pipeline never resolves identity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Author,
    Admin,
}

/// The acting user for one publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn can_publish(&self) -> bool {
        matches!(self.role, UserRole::Author | UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_publish() {
        let author = Actor::new(Uuid::new_v4(), UserRole::Author);
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);
        let reader = Actor::new(Uuid::new_v4(), UserRole::User);
        assert!(author.can_publish());
        assert!(admin.can_publish());
        assert!(!reader.can_publish());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&UserRole::Author).unwrap();
        assert_eq!(json, "\"author\"");
    }
}
