use async_trait::async_trait;
use models::audit::AuditedEntity;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence abstraction consumed by [`crate::crud::CrudService`].
///
/// Every data-access call runs against a transaction handle obtained from
/// [`Repository::begin`]. `save` assigns the identity and calls
/// `pre_persist` for new entities, and calls `pre_update` otherwise.
#[async_trait]
pub trait Repository<E: AuditedEntity>: Send + Sync {
    type Predicate: Send + Sync;
    type Tx: Send + Sync;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;
    async fn commit(&self, tx: Self::Tx) -> Result<(), ServiceError>;
    async fn rollback(&self, tx: Self::Tx) -> Result<(), ServiceError>;

    async fn find_by_id(&self, tx: &Self::Tx, id: Uuid) -> Result<Option<E>, ServiceError>;
    async fn exists_by_id(&self, tx: &Self::Tx, id: Uuid) -> Result<bool, ServiceError>;
    async fn save(&self, tx: &Self::Tx, entity: E) -> Result<E, ServiceError>;
    async fn delete_by_id(&self, tx: &Self::Tx, id: Uuid) -> Result<(), ServiceError>;
    /// Fails with `InvalidArgument` when more than one row matches.
    async fn find_one(&self, tx: &Self::Tx, predicate: Self::Predicate) -> Result<Option<E>, ServiceError>;
    async fn find_all(&self, tx: &Self::Tx, predicate: Self::Predicate, request: &PageRequest) -> Result<Page<E>, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::marker::PhantomData;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, MutexGuard};

    use common::types::Criteria;

    use crate::crud::QueryBuilder;

    pub type Filter<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

    /// Rows live in a committed vector; each transaction works on its own
    /// copy that replaces the committed rows on commit. Sorting is not
    /// applied, rows keep insertion order.
    pub struct InMemoryRepository<E> {
        rows: Mutex<Vec<E>>,
        calls: AtomicUsize,
        writes: AtomicUsize,
    }

    pub struct InMemoryTx<E> {
        rows: Mutex<Vec<E>>,
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
        m.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
    }

    impl<E: AuditedEntity> Default for InMemoryRepository<E> {
        fn default() -> Self { Self::with_rows(Vec::new()) }
    }

    impl<E: AuditedEntity> InMemoryRepository<E> {
        pub fn new() -> Self { Self::default() }

        pub fn with_rows(rows: Vec<E>) -> Self {
            Self { rows: Mutex::new(rows), calls: AtomicUsize::new(0), writes: AtomicUsize::new(0) }
        }

        /// Committed rows.
        pub fn snapshot(&self) -> Vec<E> {
            self.rows.lock().map(|r| r.clone()).unwrap_or_default()
        }

        /// Data-access calls made so far (transaction control excluded).
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        /// `save` and `delete_by_id` calls made so far.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        fn record(&self, write: bool) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if write {
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[async_trait]
    impl<E: AuditedEntity> Repository<E> for InMemoryRepository<E> {
        type Predicate = Filter<E>;
        type Tx = InMemoryTx<E>;

        async fn begin(&self) -> Result<InMemoryTx<E>, ServiceError> {
            let rows = lock(&self.rows)?.clone();
            Ok(InMemoryTx { rows: Mutex::new(rows) })
        }

        async fn commit(&self, tx: InMemoryTx<E>) -> Result<(), ServiceError> {
            let rows = tx.rows.into_inner().map_err(|_| ServiceError::Db("in-memory tx poisoned".into()))?;
            *lock(&self.rows)? = rows;
            Ok(())
        }

        async fn rollback(&self, _tx: InMemoryTx<E>) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn find_by_id(&self, tx: &InMemoryTx<E>, id: Uuid) -> Result<Option<E>, ServiceError> {
            self.record(false);
            Ok(lock(&tx.rows)?.iter().find(|r| r.id() == Some(id)).cloned())
        }

        async fn exists_by_id(&self, tx: &InMemoryTx<E>, id: Uuid) -> Result<bool, ServiceError> {
            self.record(false);
            Ok(lock(&tx.rows)?.iter().any(|r| r.id() == Some(id)))
        }

        async fn save(&self, tx: &InMemoryTx<E>, mut entity: E) -> Result<E, ServiceError> {
            self.record(true);
            let mut rows = lock(&tx.rows)?;
            match entity.id() {
                Some(id) => {
                    let slot = rows
                        .iter_mut()
                        .find(|r| r.id() == Some(id))
                        .ok_or_else(|| ServiceError::Db(format!("no row with id [{id}] to update")))?;
                    entity.pre_update();
                    *slot = entity.clone();
                }
                None => {
                    entity.assign_id(Uuid::new_v4());
                    entity.pre_persist();
                    rows.push(entity.clone());
                }
            }
            Ok(entity)
        }

        async fn delete_by_id(&self, tx: &InMemoryTx<E>, id: Uuid) -> Result<(), ServiceError> {
            self.record(true);
            lock(&tx.rows)?.retain(|r| r.id() != Some(id));
            Ok(())
        }

        async fn find_one(&self, tx: &InMemoryTx<E>, predicate: Filter<E>) -> Result<Option<E>, ServiceError> {
            self.record(false);
            let rows = lock(&tx.rows)?;
            let mut matches = rows.iter().filter(|r| predicate(*r));
            let first = matches.next().cloned();
            if matches.next().is_some() {
                return Err(ServiceError::InvalidArgument("criteria matched more than one resource".into()));
            }
            Ok(first)
        }

        async fn find_all(&self, tx: &InMemoryTx<E>, predicate: Filter<E>, request: &PageRequest) -> Result<Page<E>, ServiceError> {
            self.record(false);
            let rows = lock(&tx.rows)?;
            let matching: Vec<&E> = rows.iter().filter(|r| predicate(*r)).collect();
            let content = matching
                .iter()
                .skip(request.offset() as usize)
                .take(request.size as usize)
                .map(|r| (*r).clone())
                .collect();
            Ok(Page::new(content, request, matching.len() as u64))
        }
    }

    /// Query builder that ignores criteria and matches every row.
    pub struct MatchAll<E>(PhantomData<fn() -> E>);

    impl<E> Default for MatchAll<E> {
        fn default() -> Self { Self(PhantomData) }
    }

    impl<E: 'static> QueryBuilder for MatchAll<E> {
        type Predicate = Filter<E>;

        fn build(&self, _criteria: &Criteria) -> Result<Filter<E>, ServiceError> {
            Ok(Arc::new(|_: &E| true))
        }
    }
}
