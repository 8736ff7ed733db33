//! Stable keys of the localized labels used by the service.
//!
//! Values are looked up through the string catalog port; `{$a}` in a value is
//! replaced by the optional argument.

/// Group label for System-level cohorts.
pub const SYSTEM_CONTEXT: &str = "systemcontext";
/// Group label for category cohorts, takes the category path as argument.
pub const CATEGORY_CONTEXT: &str = "categorycontext";
/// Cohort field label and listing header.
pub const COHORT: &str = "cohort";
/// Help text for the cohort field.
pub const COHORT_HELP: &str = "cohort_help";
/// Listing header for the cohort context column.
pub const COHORT_CONTEXT: &str = "cohortcontext";
/// Role field label and listing header.
pub const ROLE: &str = "role";
/// Help text for the role field.
pub const ROLE_HELP: &str = "role_help";
/// Listing header for the creation time column.
pub const MODIFIED: &str = "modified";
/// Listing header for the action column.
pub const EDIT: &str = "edit";
/// Delete action label.
pub const DELETE: &str = "delete";
/// Prompt shown before a rule is deleted.
pub const DELETE_CONFIRM: &str = "deleteconfirm";
/// Field error for a duplicate cohort/role pair.
pub const ERROR_EXISTS: &str = "errorexists";
/// Field error for an unusable cohort.
pub const INVALID_ITEM_ID: &str = "invaliditemid";
/// Field error for an unknown role.
pub const INVALID_ROLE_ID: &str = "invalidroleid";
/// Field error for a missing selection.
pub const REQUIRED: &str = "required";
/// Name of the rule created event.
pub const EVENT_DEFINITION_CREATED: &str = "eventdefinitioncreated";
/// Name of the rule deleted event.
pub const EVENT_DEFINITION_DELETED: &str = "eventdefinitiondeleted";
/// Heading of the add page.
pub const HEADING_ADD: &str = "heading_add";
/// Heading of the delete page.
pub const HEADING_DELETE: &str = "heading_delete";
/// Heading of the listing page.
pub const HEADING_INDEX: &str = "heading_index";
/// Notification after a rule was created.
pub const NOTIFICATION_CREATED: &str = "notificationcreated";
/// Notification after a rule was deleted.
pub const NOTIFICATION_DELETED: &str = "notificationdeleted";
/// Service name.
pub const PLUGIN_NAME: &str = "pluginname";
/// `chrono` format string for listing timestamps.
pub const STRFTIME_DATETIME: &str = "strftimedatetime";
/// Placeholder for a cohort context that no longer exists.
pub const UNKNOWN_CONTEXT: &str = "unknowncontext";
/// Locale name passed to `chrono` when formatting listing timestamps.
pub const DATE_LOCALE: &str = "datelocale";

/// Name of the built-in manager role.
pub const ROLE_MANAGER: &str = "role_manager";
/// Name of the built-in course creator role.
pub const ROLE_COURSE_CREATOR: &str = "role_coursecreator";
/// Name of the built-in editing teacher role.
pub const ROLE_EDITING_TEACHER: &str = "role_editingteacher";
/// Name of the built-in non-editing teacher role.
pub const ROLE_TEACHER: &str = "role_teacher";
/// Name of the built-in student role.
pub const ROLE_STUDENT: &str = "role_student";
/// Name of the built-in guest role.
pub const ROLE_GUEST: &str = "role_guest";
/// Name of the built-in authenticated user role.
pub const ROLE_USER: &str = "role_user";
/// Name of the built-in front page role.
pub const ROLE_FRONTPAGE: &str = "role_frontpage";

/// Returns the label key naming a built-in role, by its short name.
#[must_use]
pub fn builtin_role_key(shortname: &str) -> Option<&'static str> {
    match shortname {
        "manager" => Some(ROLE_MANAGER),
        "coursecreator" => Some(ROLE_COURSE_CREATOR),
        "editingteacher" => Some(ROLE_EDITING_TEACHER),
        "teacher" => Some(ROLE_TEACHER),
        "student" => Some(ROLE_STUDENT),
        "guest" => Some(ROLE_GUEST),
        "user" => Some(ROLE_USER),
        "frontpage" => Some(ROLE_FRONTPAGE),
        _ => None,
    }
}
