//! Ancestor walk used to build category breadcrumbs.
//!
//! Category trees are shallow, but stored parent ids can dangle or point back
//! at the category itself. The walk is bounded and never fails: it stops with
//! whatever path it has collected.

use crate::Category;

/// Maximum number of parent hops taken while building a path.
pub const MAX_CATEGORY_DEPTH: usize = 10;

/// Separator placed between path segments.
pub const CATEGORY_PATH_SEPARATOR: &str = " / ";

/// Joins ancestor names (oldest first) and the leaf name into a breadcrumb.
#[must_use]
pub fn join_category_path(ancestors: &[String], leaf: &str) -> String {
    if ancestors.is_empty() {
        return leaf.to_owned();
    }

    format!(
        "{}{CATEGORY_PATH_SEPARATOR}{leaf}",
        ancestors.join(CATEGORY_PATH_SEPARATOR)
    )
}

/// Bounded walk up a category's parent chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorWalk {
    pending: Option<i64>,
    ancestors: Vec<String>,
    hops: usize,
}

impl AncestorWalk {
    /// Starts a walk at the given category.
    #[must_use]
    pub fn starting_at(category: &Category) -> Self {
        Self {
            pending: category.parent_id(),
            ancestors: Vec::new(),
            hops: 0,
        }
    }

    /// Returns the next parent to look up, or `None` once the walk is over.
    #[must_use]
    pub fn next_parent(&self) -> Option<i64> {
        if self.hops >= MAX_CATEGORY_DEPTH {
            return None;
        }

        self.pending
    }

    /// Records a resolved parent and moves to its own parent.
    pub fn visit(&mut self, parent: &Category, formatted_name: String) {
        self.ancestors.push(formatted_name);
        self.pending = parent.parent_id();
        self.hops += 1;
    }

    /// Ends the walk early, keeping the ancestors collected so far.
    pub fn stop(&mut self) {
        self.pending = None;
    }

    /// Number of ancestors collected.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Builds the breadcrumb for the leaf the walk started at.
    #[must_use]
    pub fn into_path(self, formatted_leaf: &str) -> String {
        let mut ancestors = self.ancestors;
        ancestors.reverse();
        join_category_path(&ancestors, formatted_leaf)
    }
}
