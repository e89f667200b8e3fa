//! Role classification.

/// The four user roles the client distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Administrator,
    Coordinator,
    Driver,
    Customer,
}

impl Role {
    /// Classify a role name from the backend.
    ///
    /// Matches the known vocabulary exactly after trimming and lowercasing;
    /// both the Spanish and English names are accepted. Unknown names return
    /// `None` rather than guessing — callers decide the fallback.
    pub fn from_role_name(name: &str) -> Option<Role> {
        match name.trim().to_lowercase().as_str() {
            "administrador" | "administrator" => Some(Role::Administrator),
            "coordinador" | "coordinator" => Some(Role::Coordinator),
            "conductor" | "driver" => Some(Role::Driver),
            "cliente" | "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_classify() {
        assert_eq!(Role::from_role_name("administrador"), Some(Role::Administrator));
        assert_eq!(Role::from_role_name("Administrator"), Some(Role::Administrator));
        assert_eq!(Role::from_role_name("COORDINADOR"), Some(Role::Coordinator));
        assert_eq!(Role::from_role_name("coordinator"), Some(Role::Coordinator));
        assert_eq!(Role::from_role_name("conductor"), Some(Role::Driver));
        assert_eq!(Role::from_role_name("driver"), Some(Role::Driver));
        assert_eq!(Role::from_role_name("cliente"), Some(Role::Customer));
        assert_eq!(Role::from_role_name("customer"), Some(Role::Customer));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(Role::from_role_name("  Administrador "), Some(Role::Administrator));
    }

    #[test]
    fn unknown_names_do_not_classify() {
        // A name merely containing a role word must not match.
        assert_eq!(Role::from_role_name("ex-administrador"), None);
        assert_eq!(Role::from_role_name("administradores"), None);
        assert_eq!(Role::from_role_name("super driver"), None);
        assert_eq!(Role::from_role_name(""), None);
    }
}
