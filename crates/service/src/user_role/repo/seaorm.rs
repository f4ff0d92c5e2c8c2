use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait, IdenStatic, Iterable,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use models::audit::AuditedEntity;
use models::user_role::{self, UserRole};

use crate::crud::Repository;
use crate::errors::ServiceError;
use crate::pagination::{Direction, Page, PageRequest, Sort};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// `sortBy` accepts either the camelCase property name or the column name.
fn sort_column(property: &str) -> Result<user_role::Column, ServiceError> {
    let mut snake = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            snake.push('_');
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    user_role::Column::iter()
        .find(|c| c.as_str() == snake)
        .ok_or_else(|| ServiceError::InvalidArgument(format!("cannot sort by unknown property [{property}]")))
}

#[derive(Clone)]
pub struct SeaOrmUserRoleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Repository<UserRole> for SeaOrmUserRoleRepository {
    type Predicate = Condition;
    type Tx = DatabaseTransaction;

    async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        self.db.begin().await.map_err(db_err)
    }

    async fn commit(&self, tx: DatabaseTransaction) -> Result<(), ServiceError> {
        tx.commit().await.map_err(db_err)
    }

    async fn rollback(&self, tx: DatabaseTransaction) -> Result<(), ServiceError> {
        tx.rollback().await.map_err(db_err)
    }

    #[instrument(skip(self, tx))]
    async fn find_by_id(&self, tx: &DatabaseTransaction, id: Uuid) -> Result<Option<UserRole>, ServiceError> {
        let row = user_role::Entity::find_by_id(id).one(tx).await.map_err(db_err)?;
        Ok(row.map(UserRole::from))
    }

    async fn exists_by_id(&self, tx: &DatabaseTransaction, id: Uuid) -> Result<bool, ServiceError> {
        let n = user_role::Entity::find_by_id(id).count(tx).await.map_err(db_err)?;
        Ok(n > 0)
    }

    #[instrument(skip(self, tx, entity), fields(id = ?entity.id))]
    async fn save(&self, tx: &DatabaseTransaction, mut entity: UserRole) -> Result<UserRole, ServiceError> {
        let model = if entity.has_id() {
            entity.pre_update();
            entity.to_active_model().update(tx).await.map_err(db_err)?
        } else {
            entity.assign_id(Uuid::new_v4());
            entity.pre_persist();
            entity.to_active_model().insert(tx).await.map_err(db_err)?
        };
        Ok(UserRole::from(model))
    }

    #[instrument(skip(self, tx))]
    async fn delete_by_id(&self, tx: &DatabaseTransaction, id: Uuid) -> Result<(), ServiceError> {
        user_role::Entity::delete_by_id(id).exec(tx).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_one(&self, tx: &DatabaseTransaction, predicate: Condition) -> Result<Option<UserRole>, ServiceError> {
        let mut rows = user_role::Entity::find().filter(predicate).limit(2u64).all(tx).await.map_err(db_err)?;
        if rows.len() > 1 {
            return Err(ServiceError::InvalidArgument("criteria matched more than one resource".into()));
        }
        Ok(rows.pop().map(UserRole::from))
    }

    #[instrument(skip(self, tx, predicate))]
    async fn find_all(
        &self,
        tx: &DatabaseTransaction,
        predicate: Condition,
        request: &PageRequest,
    ) -> Result<Page<UserRole>, ServiceError> {
        let mut query = user_role::Entity::find().filter(predicate);
        if let Some(Sort { property, direction }) = &request.sort {
            let order = match direction {
                Direction::Asc => Order::Asc,
                Direction::Desc => Order::Desc,
            };
            query = query.order_by(sort_column(property)?, order);
        }
        let paginator = query.paginate(tx, request.size);
        let total = paginator.num_items().await.map_err(db_err)?;
        let rows = paginator.fetch_page(request.page).await.map_err(db_err)?;
        Ok(Page::new(rows.into_iter().map(UserRole::from).collect(), request, total))
    }
}
