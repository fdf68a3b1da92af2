use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, PrimaryKeyTrait, TransactionTrait,
};

/// Generic data-access wrapper over a single entity type, parameterized by
/// the entity's active model.
///
/// Every operation runs inside the request-scoped transaction opened by
/// [`Repository::begin`]. Nothing is durable until [`Repository::commit`];
/// `commit` and `rollback` consume the repository, so no operation can be
/// issued after the transaction is finalized.
pub struct Repository<A>
where
    A: ActiveModelTrait,
{
    txn: DatabaseTransaction,
    model: PhantomData<A>,
}

impl<A> Repository<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    /// Opens a transaction on the given connection and wraps it.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            txn: db.begin().await?,
            model: PhantomData,
        })
    }

    /// Looks up a single record by primary key. A miss is not an error.
    pub async fn get_by_pk(
        &self,
        pk: <<A::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<<A::Entity as EntityTrait>::Model>, DbErr> {
        <A::Entity as EntityTrait>::find_by_id(pk).one(&self.txn).await
    }

    /// Returns every record of the entity, in primary-key order.
    pub async fn all(&self) -> Result<Vec<<A::Entity as EntityTrait>::Model>, DbErr> {
        <A::Entity as EntityTrait>::find().all(&self.txn).await
    }

    /// Inserts a new record within the transaction and returns it with its
    /// assigned identifier and server-side defaults applied.
    pub async fn create(&self, model: A) -> Result<<A::Entity as EntityTrait>::Model, DbErr> {
        model.insert(&self.txn).await
    }

    /// Persists in-place mutations within the transaction.
    pub async fn update(&self, model: A) -> Result<<A::Entity as EntityTrait>::Model, DbErr> {
        model.update(&self.txn).await
    }

    /// Marks a record for removal within the transaction.
    pub async fn delete(
        &self,
        model: <A::Entity as EntityTrait>::Model,
    ) -> Result<DeleteResult, DbErr> {
        <A::Entity as EntityTrait>::delete(model.into_active_model())
            .exec(&self.txn)
            .await
    }

    /// Finalizes the transaction, making all pending writes durable.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Discards every pending write in the transaction.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
