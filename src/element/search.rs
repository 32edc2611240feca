//! Depth-first search over element trees
//!
//! Both searches walk slots in declaration order, resolving deferred children
//! through the pass memo, and return the first element whose own slug or type
//! matches. Visibility is never consulted: a hidden subtree must remain
//! addressable, since the client requesting a partial rebuild is typically the
//! same actor whose action flips visibility on.

use crate::element::{Element, ElementRef};
use crate::error::BuildError;
use crate::pass::BuildPass;
use crate::types::Slug;

/// Find the element whose slug equals `slug`
///
/// Returns `Ok(None)` when nothing matches; an unresolvable deferred child is
/// fatal and propagates.
pub fn find_by_slug(
    root: &ElementRef,
    slug: &Slug,
    pass: &BuildPass<'_>,
) -> Result<Option<ElementRef>, BuildError> {
    if root.slug() == *slug {
        return Ok(Some(root.clone()));
    }

    for refs in root.slots().values() {
        for child_ref in refs {
            let child = pass.resolve(child_ref)?;
            if let Some(found) = find_by_slug(&child, slug, pass)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

/// Find the first element of concrete type `T`
pub fn find_by_type<T: Element>(
    root: &ElementRef,
    pass: &BuildPass<'_>,
) -> Result<Option<ElementRef>, BuildError> {
    if root.as_any().downcast_ref::<T>().is_some() {
        return Ok(Some(root.clone()));
    }

    for refs in root.slots().values() {
        for child_ref in refs {
            let child = pass.resolve(child_ref)?;
            if let Some(found) = find_by_type::<T>(&child, pass)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}
