use sea_orm::{entity::prelude::*, ActiveValue::{NotSet, Set}};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::audit::{fill_gap, AuditedEntity, Merge, Timestamp};
use crate::errors;

pub const NAME_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// In-memory user role. Every field may be absent: a new role has no
/// identity yet and a partial update only carries what the caller sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserRole {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

impl AuditedEntity for UserRole {
    fn id(&self) -> Option<Uuid> { self.id }

    fn assign_id(&mut self, id: Uuid) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    fn created_at(&self) -> Option<Timestamp> { self.created_at }

    fn set_created_at(&mut self, at: Option<Timestamp>) { self.created_at = at; }

    fn updated_at(&self) -> Option<Timestamp> { self.updated_at }

    fn set_updated_at(&mut self, at: Option<Timestamp>) { self.updated_at = at; }

    fn deleted_at(&self) -> Option<Timestamp> { self.deleted_at }
}

impl Merge for UserRole {
    fn fill_from(&mut self, source: &Self) {
        fill_gap(&mut self.id, &source.id);
        fill_gap(&mut self.name, &source.name);
        fill_gap(&mut self.description, &source.description);
        fill_gap(&mut self.created_at, &source.created_at);
        fill_gap(&mut self.updated_at, &source.updated_at);
        fill_gap(&mut self.deleted_at, &source.deleted_at);
    }
}

impl From<Model> for UserRole {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: Some(m.name),
            description: m.description,
            created_at: Some(m.created_at),
            updated_at: m.updated_at,
            deleted_at: m.deleted_at,
        }
    }
}

impl UserRole {
    /// Absent values on NOT NULL columns stay `NotSet` so an update leaves
    /// the stored value alone; nullable columns are always written.
    pub fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: self.id.map_or(NotSet, Set),
            name: self.name.clone().map_or(NotSet, Set),
            description: Set(self.description.clone()),
            created_at: self.created_at.map_or(NotSet, Set),
            updated_at: Set(self.updated_at),
            deleted_at: Set(self.deleted_at),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}
