//! Access policy evaluation.
//!
//! [`authorize`] is a pure function of `(actor, action, resource)`. It never
//! touches the database; callers look up whatever ownership fields the rule
//! needs, describe the target as a [`Resource`], and must stop on
//! [`Decision::Deny`] before running the guarded query.
//!
//! Rules are evaluated in this order:
//!
//! 1. Gallery creation is photographer-only and selection toggles are
//!    client-only, for every role (admin included).
//! 2. Admins are allowed everything else.
//! 3. Photographers may act on what they own: their galleries, sessions,
//!    photos, their own user record, and the records of their clients.
//! 4. Clients may read galleries assigned to them, curate photos in those
//!    galleries, and read or update their own user record.
//!
//! Anything not explicitly allowed is denied.

use std::fmt;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// The authenticated identity performing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }
}

/// What the actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    List,
    Create,
    Update,
    Delete,
    /// Attach or detach photos (galleries) or upload photo records (sessions).
    ManagePhotos,
    /// Flip the `selected` or `favorite` flag of a photo in a gallery.
    ToggleSelection,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Read => "read",
            Action::List => "list",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::ManagePhotos => "manage photos of",
            Action::ToggleSelection => "curate photos in",
        })
    }
}

/// Entity families, used for collection-level checks and scope derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Gallery,
    PhotoSession,
    User,
}

/// The guarded target, reduced to the ownership fields the rules inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Gallery {
        photographer_id: DbId,
        client_id: Option<DbId>,
    },
    PhotoSession {
        photographer_id: DbId,
    },
    /// A photo, described by the owner of the session it belongs to.
    Photo {
        photographer_id: DbId,
    },
    /// A user record. `id` is `None` for a record that is about to be created.
    User {
        id: Option<DbId>,
        role: Role,
        photographer_id: Option<DbId>,
    },
    /// The whole collection of one kind, for `List`.
    Collection(ResourceKind),
}

impl Resource {
    fn noun(&self) -> &'static str {
        match self {
            Resource::Gallery { .. } => "this gallery",
            Resource::PhotoSession { .. } => "this photo session",
            Resource::Photo { .. } => "this photo",
            Resource::User { .. } => "this user",
            Resource::Collection(ResourceKind::Gallery) => "galleries",
            Resource::Collection(ResourceKind::PhotoSession) => "photo sessions",
            Resource::Collection(ResourceKind::User) => "users",
        }
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert into a `Result`, mapping a denial to [`CoreError::Forbidden`].
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(CoreError::Forbidden(reason)),
        }
    }
}

/// Decide whether `actor` may perform `action` on `resource`.
pub fn authorize(actor: &Actor, action: Action, resource: &Resource) -> Decision {
    if matches!(resource, Resource::Gallery { .. })
        && action == Action::Create
        && actor.role != Role::Photographer
    {
        return Decision::Deny("Only photographers can create galleries".into());
    }

    if action == Action::ToggleSelection && actor.role != Role::Client {
        return Decision::Deny("Only the assigned client can curate a gallery".into());
    }

    let allowed = match actor.role {
        Role::Admin => true,
        Role::Photographer => photographer_allows(actor.id, action, resource),
        Role::Client => client_allows(actor.id, action, resource),
    };

    if allowed {
        Decision::Allow
    } else {
        Decision::Deny(format!("Not allowed to {action} {}", resource.noun()))
    }
}

/// Shorthand for `authorize(..).into_result()`.
pub fn ensure(actor: &Actor, action: Action, resource: &Resource) -> Result<(), CoreError> {
    authorize(actor, action, resource).into_result()
}

fn photographer_allows(me: DbId, action: Action, resource: &Resource) -> bool {
    use Action::*;

    match (*resource, action) {
        (Resource::Gallery { photographer_id, .. }, Read | Create | Update | Delete | ManagePhotos)
        | (
            Resource::PhotoSession { photographer_id },
            Read | Create | Update | Delete | ManagePhotos,
        )
        | (Resource::Photo { photographer_id }, Read | Create | Update | Delete) => {
            photographer_id == me
        }
        (Resource::User { id: Some(id), .. }, Read | Update) if id == me => true,
        (
            Resource::User {
                role: Role::Client,
                photographer_id: Some(owner),
                ..
            },
            Read | Create | Update | Delete,
        ) => owner == me,
        (Resource::Collection(_), List) => true,
        _ => false,
    }
}

fn client_allows(me: DbId, action: Action, resource: &Resource) -> bool {
    use Action::*;

    match (*resource, action) {
        (
            Resource::Gallery {
                client_id: Some(client_id),
                ..
            },
            Read | ToggleSelection,
        ) => client_id == me,
        (Resource::User { id: Some(id), .. }, Read | Update) => id == me,
        (Resource::Collection(ResourceKind::Gallery), List) => true,
        _ => false,
    }
}
