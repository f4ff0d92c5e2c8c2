//! Contract shared by every persisted resource.
//!
//! An entity carries an identity that persistence assigns on first insert,
//! plus creation / update / soft-deletion timestamps. Repositories call
//! [`AuditedEntity::pre_persist`] before an insert and
//! [`AuditedEntity::pre_update`] before every later write.

use std::fmt::Debug;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

pub type Timestamp = DateTimeWithTimeZone;

/// Current time with a fixed (UTC) offset, as stored in audit columns.
pub fn now() -> Timestamp {
    Utc::now().into()
}

pub trait AuditedEntity: Clone + Debug + Send + Sync + 'static {
    fn id(&self) -> Option<Uuid>;

    /// Persistence only. Does nothing when an identity is already present.
    fn assign_id(&mut self, id: Uuid);

    fn created_at(&self) -> Option<Timestamp>;

    fn set_created_at(&mut self, at: Option<Timestamp>);

    fn updated_at(&self) -> Option<Timestamp>;

    fn set_updated_at(&mut self, at: Option<Timestamp>);

    fn deleted_at(&self) -> Option<Timestamp>;

    fn has_id(&self) -> bool {
        self.id().is_some()
    }

    fn has_deleted_at(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Stamp the creation time. Called once, right before the insert.
    fn pre_persist(&mut self) {
        self.set_created_at(Some(now()));
    }

    /// Stamp the update time. Called before every write after the insert.
    fn pre_update(&mut self) {
        self.set_updated_at(Some(now()));
    }
}

/// Gap-filling merge, written out field by field for each entity shape.
///
/// `fill_from` must leave every field that is already `Some` on `self`
/// untouched and copy the source value into every field that is `None`.
/// Nested values are cloned whole, never merged recursively.
pub trait Merge {
    fn fill_from(&mut self, source: &Self);
}

/// Fill the gaps of `target` (the incoming partial entity) from `source`
/// (the stored one).
pub fn merge<E: Merge>(source: &E, target: &mut E) {
    target.fill_from(source);
}

/// Single-field building block for [`Merge`] implementations.
pub fn fill_gap<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if target.is_none() {
        *target = source.clone();
    }
}
