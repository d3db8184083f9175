use serde::{Deserialize, Serialize};

/// Application roles carried in the `role` claim and the `app_user.role`
/// column (stored as text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppRole {
    SuperAdmin,
    AcademyAdmin,
    Coach,
    Player,
}

impl AppRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "ACADEMY_ADMIN" => Some(Self::AcademyAdmin),
            "COACH" => Some(Self::Coach),
            "PLAYER" => Some(Self::Player),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::AcademyAdmin => "ACADEMY_ADMIN",
            Self::Coach => "COACH",
            Self::Player => "PLAYER",
        }
    }

    /// Roles allowed to manage academies and invites.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::AcademyAdmin)
    }

    /// Roles that can be handed out through an invite token.
    pub fn is_invitable(&self) -> bool {
        matches!(self, Self::AcademyAdmin | Self::Coach | Self::Player)
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "roles_test.rs"]
mod tests;
