use serde::{Deserialize, Serialize};

use crate::labels;

/// Named group of users scoped to a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Cohort identifier.
    pub id: i64,
    /// Raw cohort name, unfiltered.
    pub name: String,
    /// Context the cohort belongs to.
    pub context_id: i64,
}

/// Role definition from the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: i64,
    /// Stable short name.
    pub shortname: String,
    /// Custom full name, empty for built-in roles.
    pub name: String,
    /// Ordering hint from the role administration page.
    pub sortorder: i64,
}

impl Role {
    /// Returns the role name shown to administrators.
    ///
    /// Built-in roles carry an empty `name` and fall back to their short name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.shortname.as_str()
        } else {
            self.name.as_str()
        }
    }

    /// Label key of the localized name, for built-in roles without a custom name.
    #[must_use]
    pub fn builtin_name_key(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            labels::builtin_role_key(self.shortname.trim())
        } else {
            None
        }
    }
}

/// Course category node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: i64,
    /// Raw category name, unfiltered.
    pub name: String,
    /// Parent category, `None` or `0` for top-level categories.
    pub parent: Option<i64>,
    /// Position in the category tree listing.
    pub sortorder: i64,
}

impl Category {
    /// Returns the parent id when it points at a real category.
    #[must_use]
    pub fn parent_id(&self) -> Option<i64> {
        self.parent.filter(|parent| *parent > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Role};

    #[test]
    fn role_without_custom_name_uses_shortname() {
        let role = Role {
            id: 3,
            shortname: "editingteacher".to_owned(),
            name: String::new(),
            sortorder: 3,
        };
        assert_eq!(role.display_name(), "editingteacher");
    }

    #[test]
    fn builtin_roles_resolve_to_label_keys() {
        let mut role = Role {
            id: 3,
            shortname: "editingteacher".to_owned(),
            name: String::new(),
            sortorder: 3,
        };
        assert_eq!(role.builtin_name_key(), Some("role_editingteacher"));

        role.name = "Course author".to_owned();
        assert_eq!(role.builtin_name_key(), None);

        role.name = String::new();
        role.shortname = "auditor".to_owned();
        assert_eq!(role.builtin_name_key(), None);
    }

    #[test]
    fn zero_parent_is_treated_as_root() {
        let category = Category {
            id: 1,
            name: "Miscellaneous".to_owned(),
            parent: Some(0),
            sortorder: 10000,
        };
        assert_eq!(category.parent_id(), None);
    }
}
