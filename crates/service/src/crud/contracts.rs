use common::types::Criteria;

use crate::errors::ServiceError;

/// Entity <-> DTO conversion. Assumed total.
pub trait Mapper<E, D>: Send + Sync {
    fn to_entity(&self, dto: D) -> E;
    fn to_dto(&self, entity: E) -> D;
}

/// Translates caller criteria into a backend predicate.
pub trait QueryBuilder: Send + Sync {
    type Predicate: Send + Sync;

    fn build(&self, criteria: &Criteria) -> Result<Self::Predicate, ServiceError>;
}

/// Returns one message per violation; an empty list means valid.
pub trait Validator<E>: Send + Sync {
    fn validate(&self, entity: &E) -> Vec<String>;
}

/// Resource-specific steps around the generic lifecycle. Every hook runs
/// inside the operation's transaction, so an error rolls the write back.
pub trait LifecycleHooks<E>: Send + Sync {
    fn before_create(&self, _entity: &mut E) -> Result<(), ServiceError> { Ok(()) }

    fn after_create(&self, _entity: &E) -> Result<(), ServiceError> { Ok(()) }

    fn before_patch(&self, _entity: &mut E) -> Result<(), ServiceError> { Ok(()) }

    fn after_patch(&self, _entity: &E) -> Result<(), ServiceError> { Ok(()) }

    fn before_put(&self, _entity: &mut E) -> Result<(), ServiceError> { Ok(()) }

    fn after_put(&self, _entity: &E) -> Result<(), ServiceError> { Ok(()) }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl<E> LifecycleHooks<E> for NoHooks {}
