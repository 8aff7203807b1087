//! Gallery curation state and input normalization.

use crate::types::DbId;

/// Client id value that payloads use to mean "no client".
pub const UNASSIGNED_CLIENT_SENTINEL: DbId = 0;

/// Map the "no client" sentinel to `None`.
///
/// Everything past the request boundary treats an unassigned gallery as a
/// null `client_id`, never as the sentinel.
pub fn normalize_client_id(client_id: Option<DbId>) -> Option<DbId> {
    client_id.filter(|id| *id != UNASSIGNED_CLIENT_SENTINEL)
}

/// Per-photo flags a client can flip inside a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurationFlag {
    Selected,
    Favorite,
}

impl CurationFlag {
    /// Column in `gallery_photos` backing this flag.
    pub fn column(self) -> &'static str {
        match self {
            CurationFlag::Selected => "selected",
            CurationFlag::Favorite => "favorite",
        }
    }
}

/// Current values of both curation flags on one association row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurationState {
    pub selected: bool,
    pub favorite: bool,
}

impl CurationState {
    pub fn new(selected: bool, favorite: bool) -> Self {
        Self { selected, favorite }
    }

    /// The only transition: negate one flag, leave the other as is.
    pub fn toggled(self, flag: CurationFlag) -> Self {
        match flag {
            CurationFlag::Selected => Self {
                selected: !self.selected,
                ..self
            },
            CurationFlag::Favorite => Self {
                favorite: !self.favorite,
                ..self
            },
        }
    }

    pub fn get(self, flag: CurationFlag) -> bool {
        match flag {
            CurationFlag::Selected => self.selected,
            CurationFlag::Favorite => self.favorite,
        }
    }
}
