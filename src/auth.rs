use serde::Deserialize;

/// The current user's role as the backend reports it.
///
/// Values outside the known set deserialize as `Unknown`, which carries no
/// rights: gating fails closed, unlike the advisory conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    ClassTeacher,
    Admin,
    #[serde(other)]
    Unknown,
}

/// Who the current user is and what they may do.
///
/// Passed explicitly to whatever needs gating; never ambient state. The
/// backend enforces authorization on every write regardless: these checks
/// only spare the user a doomed request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthContext {
    pub display_name: String,
    pub role: Role,
}

impl AuthContext {
    pub const fn can_manage_assignments(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    pub const fn can_view_absences(&self) -> bool {
        matches!(self.role, Role::ClassTeacher | Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: Role) -> AuthContext {
        AuthContext {
            display_name: "Kis Pista".to_string(),
            role,
        }
    }

    #[test]
    fn admin_manages_assignments() {
        assert!(context(Role::Admin).can_manage_assignments());
        assert!(!context(Role::ClassTeacher).can_manage_assignments());
        assert!(!context(Role::Student).can_manage_assignments());
    }

    #[test]
    fn absence_visibility() {
        assert!(context(Role::Admin).can_view_absences());
        assert!(context(Role::ClassTeacher).can_view_absences());
        assert!(!context(Role::Student).can_view_absences());
    }

    #[test]
    fn unknown_role_has_no_rights() {
        let ctx: AuthContext =
            serde_json::from_str(r#"{"display_name": "X", "role": "superuser"}"#).unwrap();

        assert_eq!(ctx.role, Role::Unknown);
        assert!(!ctx.can_manage_assignments());
        assert!(!ctx.can_view_absences());
    }

    #[test]
    fn known_roles_deserialize() {
        let ctx: AuthContext =
            serde_json::from_str(r#"{"display_name": "X", "role": "class_teacher"}"#).unwrap();

        assert_eq!(ctx.role, Role::ClassTeacher);
    }
}
