//! Permission decisions over (actor, resource).
//!
//! Pure functions with no hidden state. Services call these before any
//! mutation; handlers never make permission decisions themselves.

use crate::domain::entities::{Actor, UrlMapping};

/// Admins may delete anything; everyone else only what they created.
pub fn can_delete(actor: &Actor, mapping: &UrlMapping) -> bool {
    actor.is_admin() || mapping.is_owned_by(actor.user_id)
}

/// Mapping details are visible to any authenticated actor.
pub fn can_view_details(actor: Option<&Actor>) -> bool {
    actor.is_some()
}

/// Only admins may edit the About page.
pub fn can_edit_site_content(actor: &Actor) -> bool {
    actor.is_admin()
}
