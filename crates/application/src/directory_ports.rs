mod lookups;
mod presentation;

pub use lookups::{COHORTS_PER_CONTEXT_LIMIT, CategoryRepository, PlatformDirectory};
pub use presentation::{Collator, PresentationPorts, StringCatalog, TextFormatter};
