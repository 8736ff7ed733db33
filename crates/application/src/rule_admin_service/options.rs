//! Select option construction for the add-rule form.
//!
//! Pure functions: callers gather cohorts, roles and group labels, these
//! functions only group, deduplicate and order them.

use std::collections::HashSet;

use cohortrole_domain::{Cohort, Role};
use serde::Serialize;

use crate::directory_ports::{Collator, PresentationPorts, TextFormatter};

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: i64,
    /// Display label.
    pub label: String,
}

/// Labelled group of select options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    /// Group label.
    pub label: String,
    /// Options in display order.
    pub options: Vec<SelectOption>,
}

/// Context that receives its own cohort group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextGroupSource {
    /// Context whose cohorts belong to the group.
    pub context_id: i64,
    /// Group label.
    pub label: String,
}

/// Groups cohorts by context, in the order of `groups`.
///
/// Options are formatted and collated within each group. Groups without
/// cohorts are left out, cohorts outside every group are ignored.
#[must_use]
pub fn build_cohort_option_groups(
    groups: &[ContextGroupSource],
    cohorts: &[Cohort],
    formatter: &dyn TextFormatter,
    collator: &dyn Collator,
) -> Vec<OptionGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let options: Vec<SelectOption> = cohorts
                .iter()
                .filter(|cohort| cohort.context_id == group.context_id)
                .map(|cohort| SelectOption {
                    value: cohort.id,
                    label: formatter.format_string(cohort.name.as_str()),
                })
                .collect();

            (!options.is_empty()).then(|| OptionGroup {
                label: group.label.clone(),
                options: sort_options(options, collator),
            })
        })
        .collect()
}

/// Unions assignable roles with roles allowed at System level.
///
/// The allow-list can surface roles the actor could not otherwise assign;
/// this keeps custom roles selectable. Entries are unique by id, the
/// assignable entry wins.
#[must_use]
pub fn merge_role_options(
    assignable: &[Role],
    allowed_at_system: &[Role],
    presentation: &PresentationPorts,
) -> Vec<SelectOption> {
    let mut seen = HashSet::new();
    let options = assignable
        .iter()
        .chain(allowed_at_system)
        .filter(|role| seen.insert(role.id))
        .map(|role| SelectOption {
            value: role.id,
            label: presentation.role_name(role),
        })
        .collect();

    sort_options(options, presentation.collator.as_ref())
}

fn sort_options(mut options: Vec<SelectOption>, collator: &dyn Collator) -> Vec<SelectOption> {
    options.sort_by(|left, right| {
        collator
            .compare(left.label.as_str(), right.label.as_str())
            .then(left.value.cmp(&right.value))
    });
    options
}
