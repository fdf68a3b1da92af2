use std::fmt::Display;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, PrimaryKeyTrait, SqlErr,
};

use crate::crud::Repository;

/// Primary-key value type of the entity behind a [`CrudResource`].
pub type PrimaryKey<R> =
    <<<R as CrudResource>::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Binds an entity to its create/update input shapes.
///
/// The two conversion points replace dynamic field copying: each resource
/// states explicitly how a create input becomes a new record and how an
/// update input overwrites an existing one (full replace, not a patch).
pub trait CrudResource {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity> + IntoActiveModel<Self::ActiveModel>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;
    type CreateInput;
    type UpdateInput;

    /// Name used in not-found messages, e.g. `"TodoTask"`.
    const RECORD_NAME: &'static str;

    /// Builds the active model for a new record, leaving server-assigned
    /// columns unset so their defaults apply.
    fn create_model(input: Self::CreateInput) -> Self::ActiveModel;

    /// Overwrites every update-input field on the loaded record.
    fn apply_update(model: Self::Model, input: Self::UpdateInput) -> Self::ActiveModel;
}

/// Error type for CRUD service operations.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// The requested identifier has no matching record.
    #[error("Record {record} with id={id} not found")]
    NotFound { record: &'static str, id: String },
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CrudError {
    fn not_found(record: &'static str, id: impl Display) -> Self {
        CrudError::NotFound {
            record,
            id: id.to_string(),
        }
    }
}

/// Generic CRUD service composing a [`Repository`] with the input-shape
/// conversions of a [`CrudResource`].
///
/// The service owns the request-scoped transaction through its repository;
/// callers finish a request with [`CrudService::commit`] (or
/// [`CrudService::rollback`]). Dropping the service without committing
/// discards the pending writes.
pub struct CrudService<R>
where
    R: CrudResource,
{
    repo: Repository<R::ActiveModel>,
}

impl<R> CrudService<R>
where
    R: CrudResource,
    PrimaryKey<R>: Clone + Display,
{
    /// Opens a request-scoped transaction and wraps it in a service.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, CrudError> {
        Ok(Self {
            repo: Repository::begin(db).await?,
        })
    }

    /// Creates a new record from the create input and returns it with its
    /// assigned identifier and defaults applied.
    #[tracing::instrument(skip(self, input), fields(record = R::RECORD_NAME))]
    pub async fn create(&self, input: R::CreateInput) -> Result<R::Model, CrudError> {
        let created = self.repo.create(R::create_model(input)).await?;
        Ok(created)
    }

    /// Replaces every update-input field of the record with the given id.
    #[tracing::instrument(skip(self, input), fields(record = R::RECORD_NAME))]
    pub async fn update(
        &self,
        id: PrimaryKey<R>,
        input: R::UpdateInput,
    ) -> Result<R::Model, CrudError> {
        let record = self
            .repo
            .get_by_pk(id.clone())
            .await?
            .ok_or_else(|| CrudError::not_found(R::RECORD_NAME, &id))?;

        let updated = self.repo.update(R::apply_update(record, input)).await?;
        Ok(updated)
    }

    /// Deletes the record with the given id.
    ///
    /// Returns `Ok(false)` when the removal is blocked by a referential
    /// integrity violation; that outcome is logged and reported to the
    /// caller as an unsuccessful best-effort delete. Any other persistence
    /// failure propagates.
    #[tracing::instrument(skip(self), fields(record = R::RECORD_NAME))]
    pub async fn delete(&self, id: PrimaryKey<R>) -> Result<bool, CrudError> {
        let record = self
            .repo
            .get_by_pk(id.clone())
            .await?
            .ok_or_else(|| CrudError::not_found(R::RECORD_NAME, &id))?;

        match self.repo.delete(record).await {
            Ok(_) => {
                tracing::debug!("Deleted {} with id={}", R::RECORD_NAME, id);
                Ok(true)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    tracing::error!(
                        "Failed to delete {} with id={} due to integrity violation: {}",
                        R::RECORD_NAME,
                        id,
                        err
                    );
                    Ok(false)
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Fetches the record with the given id, failing with
    /// [`CrudError::NotFound`] when it does not exist.
    #[tracing::instrument(skip(self), fields(record = R::RECORD_NAME))]
    pub async fn get_by_id(&self, id: PrimaryKey<R>) -> Result<R::Model, CrudError> {
        self.repo
            .get_by_pk(id.clone())
            .await?
            .ok_or_else(|| CrudError::not_found(R::RECORD_NAME, &id))
    }

    /// Returns every record of the resource.
    #[tracing::instrument(skip(self), fields(record = R::RECORD_NAME))]
    pub async fn get_all(&self) -> Result<Vec<R::Model>, CrudError> {
        Ok(self.repo.all().await?)
    }

    /// Finalizes the request transaction.
    pub async fn commit(self) -> Result<(), CrudError> {
        Ok(self.repo.commit().await?)
    }

    /// Discards the request transaction.
    pub async fn rollback(self) -> Result<(), CrudError> {
        Ok(self.repo.rollback().await?)
    }
}
