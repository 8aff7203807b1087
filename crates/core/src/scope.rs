//! Row scoping derived from the actor's role.
//!
//! A [`Scope`] limits which rows a list or lookup query may return. It is
//! computed once per request by [`scope_for`] and handed to the repository,
//! which renders it into SQL with [`Scope::filter`].

use crate::error::CoreError;
use crate::policy::{authorize, Action, Actor, Resource, ResourceKind};
use crate::roles::Role;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No restriction.
    All,
    /// Rows whose owner column equals the id.
    OwnedBy(DbId),
    /// Rows whose assignee column equals the id.
    AssignedTo(DbId),
    /// No rows at all.
    Nothing,
}

impl Scope {
    /// Render the scope as a SQL boolean expression plus the id to bind.
    ///
    /// `param` is the positional placeholder index for the bound id. When the
    /// returned bind value is `Some`, the caller must bind it at `$param`.
    /// An `AssignedTo` scope on an entity without an assignee column renders
    /// `FALSE` and binds nothing.
    pub fn filter(
        &self,
        owner_column: &str,
        assignee_column: Option<&str>,
        param: usize,
    ) -> (String, Option<DbId>) {
        match (*self, assignee_column) {
            (Scope::All, _) => ("TRUE".to_string(), None),
            (Scope::OwnedBy(id), _) => (format!("{owner_column} = ${param}"), Some(id)),
            (Scope::AssignedTo(id), Some(column)) => (format!("{column} = ${param}"), Some(id)),
            (Scope::AssignedTo(_), None) | (Scope::Nothing, _) => ("FALSE".to_string(), None),
        }
    }
}

/// Derive the list scope for `actor` over `kind`.
///
/// Returns [`CoreError::Forbidden`] when the actor may not list that kind at
/// all (e.g. a client listing users).
pub fn scope_for(actor: &Actor, kind: ResourceKind) -> Result<Scope, CoreError> {
    authorize(actor, Action::List, &Resource::Collection(kind)).into_result()?;

    Ok(match (actor.role, kind) {
        (Role::Admin, _) => Scope::All,
        (Role::Photographer, _) => Scope::OwnedBy(actor.id),
        (Role::Client, _) => Scope::AssignedTo(actor.id),
    })
}

/// Scope for flipping curation flags: a client only ever reaches galleries
/// assigned to them. For every other role no gallery matches, so the lookup
/// reports it as absent.
pub fn curation_scope(actor: &Actor) -> Scope {
    match actor.role {
        Role::Client => Scope::AssignedTo(actor.id),
        Role::Admin | Role::Photographer => Scope::Nothing,
    }
}
