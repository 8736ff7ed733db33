pub mod cohort_roles;
pub mod health;
