//! Role classification of focused elements

use std::collections::HashMap;

use crate::config::RoleConfig;

/// Coarse capability class of a focused element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Unsupported, or nothing focused
    #[default]
    None,
    Text,
    Table,
    Scroll,
}

impl Role {
    pub fn is_supported(self) -> bool {
        self != Role::None
    }

    /// Roles eligible for arrow-key navigation remapping
    pub fn is_navigable(self) -> bool {
        matches!(self, Role::Table | Role::Scroll)
    }
}

/// Table from raw platform role identifier to [`Role`]
#[derive(Debug, Clone)]
pub struct Classifier {
    table: HashMap<String, Role>,
}

impl Classifier {
    pub fn new(roles: &RoleConfig) -> Self {
        let mut table = HashMap::new();
        // Earlier classes win when a name is listed twice
        for (names, role) in [
            (&roles.scroll, Role::Scroll),
            (&roles.table, Role::Table),
            (&roles.text, Role::Text),
        ] {
            for name in names {
                table.insert(name.clone(), role);
            }
        }
        Self { table }
    }

    /// Exact-match lookup; unknown or missing roles are unsupported.
    pub fn classify(&self, raw: Option<&str>) -> Role {
        raw.and_then(|name| self.table.get(name).copied())
            .unwrap_or(Role::None)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&RoleConfig::default())
    }
}
