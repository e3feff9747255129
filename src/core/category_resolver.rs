//! Category resolution
//!
//! Transactions reference categories by title. Resolving a title either finds
//! the existing category or creates it, always on the caller's unit of work so
//! the category is only kept if the dependent transaction is.

use crate::core::traits::CategoryStore;
use crate::types::{Category, CategoryId, LedgerError};

/// Outcome of resolving a category title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryResolution {
    /// A category with this title already existed
    Found(CategoryId),

    /// A new category was staged for this title
    Created(CategoryId),
}

impl CategoryResolution {
    /// The resolved category ID, whichever way it was obtained
    pub fn id(&self) -> CategoryId {
        match self {
            CategoryResolution::Found(id) | CategoryResolution::Created(id) => *id,
        }
    }
}

/// Find a category by exact title, creating it if it does not exist
///
/// A `DuplicateCategory` error from the store means another writer created the
/// title between the lookup and the insert; the category is fetched again and
/// reported as found.
///
/// # Errors
///
/// Propagates any store error other than a duplicate title.
pub fn resolve_category<S>(store: &mut S, title: &str) -> Result<CategoryResolution, LedgerError>
where
    S: CategoryStore + ?Sized,
{
    if let Some(category) = store.find_category_by_title(title) {
        return Ok(CategoryResolution::Found(category.id));
    }

    let category = Category::new(title);
    let id = category.id;

    match store.insert_category(category) {
        Ok(()) => Ok(CategoryResolution::Created(id)),
        Err(LedgerError::DuplicateCategory { .. }) => store
            .find_category_by_title(title)
            .map(|existing| CategoryResolution::Found(existing.id))
            .ok_or_else(|| LedgerError::duplicate_category(title)),
        Err(e) => Err(e),
    }
}
