use std::collections::HashMap;

use cohortrole_application::StringCatalog;
use cohortrole_core::{AppError, AppResult};
use cohortrole_domain::labels;

const ARGUMENT_PLACEHOLDER: &str = "{$a}";

const ENGLISH: &[(&str, &str)] = &[
    (labels::CATEGORY_CONTEXT, "Category: {$a}"),
    (labels::COHORT, "Cohort"),
    (
        labels::COHORT_HELP,
        "List of cohorts defined at System level or in a course category. The role is always assigned in the System context.",
    ),
    (labels::COHORT_CONTEXT, "Cohort context"),
    (labels::DELETE, "Delete"),
    (
        labels::DELETE_CONFIRM,
        "Are you sure you want to delete this synchronization?",
    ),
    (labels::EDIT, "Edit"),
    (labels::ERROR_EXISTS, "Synchronization already defined"),
    (
        labels::EVENT_DEFINITION_CREATED,
        "Cohort role synchronization created",
    ),
    (
        labels::EVENT_DEFINITION_DELETED,
        "Cohort role synchronization deleted",
    ),
    (labels::HEADING_ADD, "Define new synchronization"),
    (labels::HEADING_DELETE, "Delete defined synchronization"),
    (labels::HEADING_INDEX, "Currently defined synchronizations"),
    (labels::INVALID_ITEM_ID, "Incorrect item ID"),
    (labels::INVALID_ROLE_ID, "Invalid role ID"),
    (labels::MODIFIED, "Modified"),
    (labels::NOTIFICATION_CREATED, "New synchronization created"),
    (labels::NOTIFICATION_DELETED, "Synchronization deleted"),
    (labels::PLUGIN_NAME, "Cohort role synchronization"),
    (labels::REQUIRED, "Required"),
    (labels::ROLE, "Role"),
    (
        labels::ROLE_HELP,
        "List of assignable roles. The role is always assigned in the System context, regardless of where the cohort lives.",
    ),
    (labels::STRFTIME_DATETIME, "%d %B %Y, %I:%M %p"),
    (labels::SYSTEM_CONTEXT, "System"),
    (labels::DATE_LOCALE, "en_US"),
    (labels::ROLE_COURSE_CREATOR, "Course creator"),
    (labels::ROLE_EDITING_TEACHER, "Teacher"),
    (labels::ROLE_FRONTPAGE, "Authenticated user on site home"),
    (labels::ROLE_GUEST, "Guest"),
    (labels::ROLE_MANAGER, "Manager"),
    (labels::ROLE_STUDENT, "Student"),
    (labels::ROLE_TEACHER, "Non-editing teacher"),
    (labels::ROLE_USER, "Authenticated user"),
    (labels::UNKNOWN_CONTEXT, "Unknown context"),
];

const GERMAN: &[(&str, &str)] = &[
    (labels::CATEGORY_CONTEXT, "Kategorie: {$a}"),
    (labels::COHORT, "Globale Gruppe"),
    (
        labels::COHORT_HELP,
        "Liste der globalen Gruppen auf Systemebene oder in Kursbereichen. Die Rolle wird immer im Systemkontext zugewiesen.",
    ),
    (labels::COHORT_CONTEXT, "Kontext der Gruppe"),
    (labels::DELETE, "Löschen"),
    (
        labels::DELETE_CONFIRM,
        "Möchten Sie diese Synchronisation wirklich löschen?",
    ),
    (labels::EDIT, "Bearbeiten"),
    (labels::ERROR_EXISTS, "Synchronisation bereits definiert"),
    (
        labels::EVENT_DEFINITION_CREATED,
        "Globale Gruppen-Rollensynchronisation erstellt",
    ),
    (
        labels::EVENT_DEFINITION_DELETED,
        "Globale Gruppen-Rollensynchronisation gelöscht",
    ),
    (labels::HEADING_ADD, "Neue Synchronisation definieren"),
    (labels::HEADING_DELETE, "Definierte Synchronisation löschen"),
    (
        labels::HEADING_INDEX,
        "Aktuell definierte Synchronisationen",
    ),
    (labels::INVALID_ITEM_ID, "Falsche Objekt-ID"),
    (labels::INVALID_ROLE_ID, "Ungültige Rollen-ID"),
    (labels::MODIFIED, "Geändert"),
    (labels::NOTIFICATION_CREATED, "Neue Synchronisation erstellt"),
    (labels::NOTIFICATION_DELETED, "Synchronisation gelöscht"),
    (
        labels::PLUGIN_NAME,
        "Globale Gruppen-Rollensynchronisation",
    ),
    (labels::REQUIRED, "Erforderlich"),
    (labels::ROLE, "Rolle"),
    (
        labels::ROLE_HELP,
        "Liste der zuweisbaren Rollen. Die Rolle wird immer im Systemkontext zugewiesen, unabhängig davon, wo sich die globale Gruppe befindet.",
    ),
    (labels::STRFTIME_DATETIME, "%d. %B %Y, %H:%M"),
    (labels::SYSTEM_CONTEXT, "System"),
    (labels::DATE_LOCALE, "de_DE"),
    (labels::ROLE_COURSE_CREATOR, "Kursersteller/in"),
    (labels::ROLE_EDITING_TEACHER, "Trainer/in"),
    (
        labels::ROLE_FRONTPAGE,
        "Authentifizierte/r Nutzer/in auf der Startseite",
    ),
    (labels::ROLE_GUEST, "Gast"),
    (labels::ROLE_MANAGER, "Manager/in"),
    (labels::ROLE_STUDENT, "Teilnehmer/in"),
    (labels::ROLE_TEACHER, "Trainer/in ohne Bearbeitungsrecht"),
    (labels::ROLE_USER, "Authentifizierte/r Nutzer/in"),
    (labels::UNKNOWN_CONTEXT, "Unbekannter Kontext"),
];

/// Label catalog compiled into the binary.
///
/// Unknown keys render as `[[key]]` so missing translations stay visible.
#[derive(Debug, Clone)]
pub struct StaticStringCatalog {
    language: &'static str,
    strings: HashMap<&'static str, &'static str>,
}

impl StaticStringCatalog {
    /// English labels.
    #[must_use]
    pub fn english() -> Self {
        Self::from_table("en", ENGLISH)
    }

    /// German labels.
    #[must_use]
    pub fn german() -> Self {
        Self::from_table("de", GERMAN)
    }

    /// Returns the catalog for a language code.
    pub fn for_language(code: &str) -> AppResult<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::english()),
            "de" => Ok(Self::german()),
            other => Err(AppError::Validation(format!(
                "unsupported language '{other}', expected 'en' or 'de'"
            ))),
        }
    }

    /// Language code of this catalog.
    #[must_use]
    pub fn language(&self) -> &'static str {
        self.language
    }

    fn from_table(language: &'static str, table: &[(&'static str, &'static str)]) -> Self {
        Self {
            language,
            strings: table.iter().copied().collect(),
        }
    }
}

impl StringCatalog for StaticStringCatalog {
    fn get_string(&self, key: &str, argument: Option<&str>) -> String {
        let Some(value) = self.strings.get(key) else {
            return format!("[[{key}]]");
        };

        match argument {
            Some(argument) => value.replace(ARGUMENT_PLACEHOLDER, argument),
            None => (*value).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cohortrole_application::StringCatalog;
    use cohortrole_domain::labels;

    use super::{ENGLISH, GERMAN, StaticStringCatalog};

    #[test]
    fn argument_is_interpolated() {
        let catalog = StaticStringCatalog::english();

        assert_eq!(
            catalog.get_string(labels::CATEGORY_CONTEXT, Some("Faculties / Science")),
            "Category: Faculties / Science"
        );
    }

    #[test]
    fn missing_key_is_visible() {
        let catalog = StaticStringCatalog::german();

        assert_eq!(catalog.get_string("nope", None), "[[nope]]");
    }

    #[test]
    fn languages_are_selected_by_code() {
        assert!(matches!(
            StaticStringCatalog::for_language(" DE "),
            Ok(ref catalog) if catalog.language() == "de"
        ));
        assert!(StaticStringCatalog::for_language("fr").is_err());
    }

    #[test]
    fn both_catalogs_define_the_same_keys() {
        let mut english: Vec<&str> = ENGLISH.iter().map(|(key, _)| *key).collect();
        let mut german: Vec<&str> = GERMAN.iter().map(|(key, _)| *key).collect();
        english.sort_unstable();
        german.sort_unstable();

        assert_eq!(english, german);
    }

    #[test]
    fn every_builtin_role_has_a_label() {
        let catalog = StaticStringCatalog::english();
        let shortnames = [
            "manager",
            "coursecreator",
            "editingteacher",
            "teacher",
            "student",
            "guest",
            "user",
            "frontpage",
        ];

        for shortname in shortnames {
            let Some(key) = labels::builtin_role_key(shortname) else {
                panic!("no label key for '{shortname}'");
            };
            assert!(!catalog.get_string(key, None).starts_with("[["));
        }
    }

    #[test]
    fn german_labels_follow_translation() {
        let catalog = StaticStringCatalog::german();

        assert_eq!(catalog.get_string(labels::COHORT, None), "Globale Gruppe");
        assert_eq!(
            catalog.get_string(labels::ROLE_EDITING_TEACHER, None),
            "Trainer/in"
        );
        assert_eq!(catalog.get_string(labels::DATE_LOCALE, None), "de_DE");
        assert_eq!(
            catalog.get_string(labels::CATEGORY_CONTEXT, Some("Kunst")),
            "Kategorie: Kunst"
        );
    }
}
