use std::cmp::Ordering;
use std::sync::Arc;

use cohortrole_domain::Role;

/// Localized label lookup keyed by stable string identifiers.
pub trait StringCatalog: Send + Sync {
    /// Returns the label for `key`, replacing `{$a}` with `argument` when given.
    fn get_string(&self, key: &str, argument: Option<&str>) -> String;
}

/// Platform-wide text filtering applied to user-provided names.
pub trait TextFormatter: Send + Sync {
    /// Formats a raw name for display.
    fn format_string(&self, raw: &str) -> String;
}

/// Locale-aware string ordering.
pub trait Collator: Send + Sync {
    /// Compares two display strings.
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

/// Presentation collaborators shared by the path resolver and the admin surface.
#[derive(Clone)]
pub struct PresentationPorts {
    /// Label catalog.
    pub strings: Arc<dyn StringCatalog>,
    /// Name filter.
    pub formatter: Arc<dyn TextFormatter>,
    /// Option ordering.
    pub collator: Arc<dyn Collator>,
}

impl PresentationPorts {
    /// Shorthand for a label without argument.
    #[must_use]
    pub fn label(&self, key: &str) -> String {
        self.strings.get_string(key, None)
    }

    /// Role name shown to administrators.
    ///
    /// Built-in roles without a custom name use their localized label.
    #[must_use]
    pub fn role_name(&self, role: &Role) -> String {
        match role.builtin_name_key() {
            Some(key) => self.label(key),
            None => self.formatter.format_string(role.display_name()),
        }
    }
}
