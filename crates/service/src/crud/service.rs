use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::types::Criteria;
use models::audit::{merge, AuditedEntity, Merge};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::crud::{LifecycleHooks, Mapper, NoHooks, QueryBuilder, Repository, Validator};
use crate::errors::ServiceError;
use crate::pagination::{parse_page_request, Page};

/// Resource operations as seen by callers (controllers, jobs), independent
/// of the entity type and storage behind them.
#[async_trait]
pub trait ResourceService<D: Send + 'static>: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<D, ServiceError>;
    async fn find_by_criteria(&self, criteria: &Criteria) -> Result<D, ServiceError>;
    async fn create(&self, dto: D) -> Result<D, ServiceError>;
    async fn patch(&self, dto: D) -> Result<D, ServiceError>;
    async fn put(&self, dto: D) -> Result<D, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn find_all(&self, criteria: &Criteria) -> Result<Page<D>, ServiceError>;
}

/// Generic CRUD service over an entity `E` exposed as DTO `D`.
///
/// Each operation opens one repository transaction and commits it only if
/// every step succeeded; any error rolls the transaction back.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use models::user_role::UserRole;
/// use service::crud::{CrudService, ResourceService};
/// use service::crud::repository::mock::{InMemoryRepository, MatchAll};
/// use service::user_role::{UserRoleDto, UserRoleMapper, UserRoleValidator};
///
/// let repo = Arc::new(InMemoryRepository::<UserRole>::new());
/// let svc: CrudService<UserRole, UserRoleDto, _, _, _, _> = CrudService::new(
///     repo.clone(),
///     Arc::new(UserRoleMapper),
///     Arc::new(MatchAll::<UserRole>::default()),
///     Arc::new(UserRoleValidator),
/// );
/// let dto = UserRoleDto { name: Some("viewer".into()), ..Default::default() };
/// let created = tokio_test::block_on(svc.create(dto)).unwrap();
/// assert!(created.id.is_some());
/// assert!(created.created_at.is_some());
/// assert_eq!(repo.snapshot().len(), 1);
/// ```
pub struct CrudService<E, D, R, M, Q, V, H = NoHooks> {
    repo: Arc<R>,
    mapper: Arc<M>,
    query: Arc<Q>,
    validator: Arc<V>,
    hooks: H,
    _types: PhantomData<fn() -> (E, D)>,
}

impl<E, D, R, M, Q, V> CrudService<E, D, R, M, Q, V, NoHooks> {
    pub fn new(repo: Arc<R>, mapper: Arc<M>, query: Arc<Q>, validator: Arc<V>) -> Self {
        Self { repo, mapper, query, validator, hooks: NoHooks, _types: PhantomData }
    }
}

impl<E, D, R, M, Q, V, H> CrudService<E, D, R, M, Q, V, H> {
    pub fn with_hooks<H2>(self, hooks: H2) -> CrudService<E, D, R, M, Q, V, H2> {
        CrudService {
            repo: self.repo,
            mapper: self.mapper,
            query: self.query,
            validator: self.validator,
            hooks,
            _types: PhantomData,
        }
    }

    pub fn repository(&self) -> &Arc<R> { &self.repo }
}

fn require_id<E: AuditedEntity>(entity: &E) -> Result<Uuid, ServiceError> {
    entity.id().ok_or_else(|| {
        debug!(?entity, "the id of the object to update is missing");
        ServiceError::InvalidArgument(format!("the id is mandatory for update operation: [{entity:?}]"))
    })
}

impl<E, D, R, M, Q, V, H> CrudService<E, D, R, M, Q, V, H>
where
    E: AuditedEntity + Merge,
    D: Send + Sync + 'static,
    R: Repository<E>,
    M: Mapper<E, D>,
    Q: QueryBuilder<Predicate = <R as Repository<E>>::Predicate>,
    V: Validator<E>,
    H: LifecycleHooks<E>,
{
    fn check_violations(&self, entity: &E) -> Result<(), ServiceError> {
        let violations = self.validator.validate(entity);
        if !violations.is_empty() {
            debug!(?entity, ?violations, "entity validation failed");
            return Err(ServiceError::InvalidArgument(format!(
                "entity [{entity:?}] validation failed with message: [{}]",
                violations.join("; ")
            )));
        }
        Ok(())
    }

    /// Validator pass plus the fields persistence owns: identity and the
    /// three audit timestamps must all be absent on create.
    fn check_before_create(&self, entity: &E) -> Result<(), ServiceError> {
        info!(?entity, "pre persist validation");
        self.check_violations(entity)?;

        let forbidden = [
            ("id", entity.has_id()),
            ("created_at", entity.created_at().is_some()),
            ("updated_at", entity.updated_at().is_some()),
            ("deleted_at", entity.deleted_at().is_some()),
        ];
        if let Some((field, _)) = forbidden.into_iter().find(|(_, set)| *set) {
            debug!(?entity, field, "field not allowed for create operation");
            return Err(ServiceError::InvalidArgument(format!(
                "field {field} not allowed for create operation for entity [{entity:?}]"
            )));
        }
        Ok(())
    }

    async fn check_before_patch(&self, tx: &R::Tx, id: Uuid, entity: &E) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(tx, id).await? {
            debug!(%id, "trying to update a row with an unknown id");
            return Err(ServiceError::InvalidArgument(format!("the id of the row to update is not valid [{id}]")));
        }
        if entity.has_deleted_at() {
            debug!(?entity, "deleted_at supplied on update");
            return Err(ServiceError::InvalidArgument(format!(
                "field deleted_at not allowed for update operation for entity [{entity:?}]"
            )));
        }
        Ok(())
    }

    async fn check_before_put(&self, tx: &R::Tx, id: Uuid, entity: &E) -> Result<(), ServiceError> {
        self.check_before_patch(tx, id, entity).await?;
        self.check_violations(entity)
    }

    /// Re-read the freshly inserted row; anything but a hit means the write
    /// cannot be trusted.
    async fn confirm_created(&self, tx: &R::Tx, saved: &E) -> Result<(), ServiceError> {
        let found = match saved.id() {
            Some(id) => self.repo.find_by_id(tx, id).await,
            None => Ok(None),
        };
        match found {
            Ok(Some(_)) => {
                info!(id = ?saved.id(), "resource persisted");
                Ok(())
            }
            Ok(None) => {
                debug!(entity = ?saved, "created resource not found on re-read");
                Err(ServiceError::ResourceCreationFailed(format!("resource created but not persisted [{saved:?}]")))
            }
            Err(e) => {
                debug!(entity = ?saved, error = %e, "re-read of created resource failed");
                Err(ServiceError::ResourceCreationFailed(format!("resource created but not persisted [{saved:?}]: {e}")))
            }
        }
    }

    async fn finish<T: Send>(&self, tx: R::Tx, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
        match result {
            Ok(value) => {
                self.repo.commit(tx).await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.repo.rollback(tx).await {
                    warn!(error = %rollback, cause = %e, "rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn create_in(&self, tx: &R::Tx, mut entity: E) -> Result<D, ServiceError> {
        self.hooks.before_create(&mut entity)?;
        let saved = self.repo.save(tx, entity).await?;
        self.confirm_created(tx, &saved).await?;
        self.hooks.after_create(&saved)?;
        Ok(self.mapper.to_dto(saved))
    }

    async fn patch_in(&self, tx: &R::Tx, id: Uuid, mut entity: E) -> Result<D, ServiceError> {
        self.check_before_patch(tx, id, &entity).await?;
        if let Some(stored) = self.repo.find_by_id(tx, id).await? {
            merge(&stored, &mut entity);
        }
        self.hooks.before_patch(&mut entity)?;
        let saved = self.repo.save(tx, entity).await?;
        self.hooks.after_patch(&saved)?;
        Ok(self.mapper.to_dto(saved))
    }

    async fn put_in(&self, tx: &R::Tx, id: Uuid, mut entity: E) -> Result<D, ServiceError> {
        self.check_before_put(tx, id, &entity).await?;
        if let Some(stored) = self.repo.find_by_id(tx, id).await? {
            entity.set_created_at(stored.created_at());
        }
        self.hooks.before_put(&mut entity)?;
        let saved = self.repo.save(tx, entity).await?;
        self.hooks.after_put(&saved)?;
        Ok(self.mapper.to_dto(saved))
    }

    async fn delete_in(&self, tx: &R::Tx, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(tx, id).await? {
            debug!(%id, "trying to remove a resource with an unknown id");
            return Err(ServiceError::InvalidArgument(format!("the resource you are trying to remove does not exist [{id}]")));
        }
        self.repo.delete_by_id(tx, id).await?;
        if self.repo.exists_by_id(tx, id).await? {
            debug!(%id, "delete was not effective");
            return Err(ServiceError::InvalidArgument(format!("resource [{id}] not deleted")));
        }
        Ok(())
    }
}

#[async_trait]
impl<E, D, R, M, Q, V, H> ResourceService<D> for CrudService<E, D, R, M, Q, V, H>
where
    E: AuditedEntity + Merge,
    D: Send + Sync + 'static,
    R: Repository<E>,
    M: Mapper<E, D>,
    Q: QueryBuilder<Predicate = <R as Repository<E>>::Predicate>,
    V: Validator<E>,
    H: LifecycleHooks<E>,
{
    #[instrument(skip(self))]
    async fn find(&self, id: Uuid) -> Result<D, ServiceError> {
        let tx = self.repo.begin().await?;
        let found = self.repo.find_by_id(&tx, id).await;
        let found = self.finish(tx, found).await?;
        found
            .map(|e| self.mapper.to_dto(e))
            .ok_or_else(|| ServiceError::not_found(&format!("resource with id [{id}]")))
    }

    #[instrument(skip(self))]
    async fn find_by_criteria(&self, criteria: &Criteria) -> Result<D, ServiceError> {
        let predicate = self.query.build(criteria)?;
        let tx = self.repo.begin().await?;
        let found = self.repo.find_one(&tx, predicate).await;
        let found = self.finish(tx, found).await?;
        found
            .map(|e| self.mapper.to_dto(e))
            .ok_or_else(|| ServiceError::not_found(&format!("resource with criteria [{criteria:?}]")))
    }

    #[instrument(skip(self, dto))]
    async fn create(&self, dto: D) -> Result<D, ServiceError> {
        let entity = self.mapper.to_entity(dto);
        self.check_before_create(&entity)?;

        let tx = self.repo.begin().await?;
        let result = self.create_in(&tx, entity).await;
        self.finish(tx, result).await
    }

    #[instrument(skip(self, dto))]
    async fn patch(&self, dto: D) -> Result<D, ServiceError> {
        let entity = self.mapper.to_entity(dto);
        info!(?entity, "validation before patch");
        let id = require_id(&entity)?;

        let tx = self.repo.begin().await?;
        let result = self.patch_in(&tx, id, entity).await;
        self.finish(tx, result).await
    }

    #[instrument(skip(self, dto))]
    async fn put(&self, dto: D) -> Result<D, ServiceError> {
        let entity = self.mapper.to_entity(dto);
        info!(?entity, "validation before put");
        let id = require_id(&entity)?;

        let tx = self.repo.begin().await?;
        let result = self.put_in(&tx, id, entity).await;
        self.finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let tx = self.repo.begin().await?;
        let result = self.delete_in(&tx, id).await;
        self.finish(tx, result).await
    }

    #[instrument(skip(self))]
    async fn find_all(&self, criteria: &Criteria) -> Result<Page<D>, ServiceError> {
        let request = parse_page_request(criteria)?;
        let predicate = self.query.build(criteria)?;

        let tx = self.repo.begin().await?;
        let page = self.repo.find_all(&tx, predicate, &request).await;
        let page = self.finish(tx, page).await?;
        debug!(total = page.total_elements, page = page.page, size = page.size, "resources listed");
        Ok(page.map(|e| self.mapper.to_dto(e)))
    }
}
