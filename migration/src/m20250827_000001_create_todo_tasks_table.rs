use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const DEFAULT_STATUS: &str = "pending";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TodoTask::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TodoTask::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TodoTask::Title).text().not_null())
                    .col(ColumnDef::new(TodoTask::Description).text().not_null())
                    .col(
                        ColumnDef::new(TodoTask::Status)
                            .string()
                            .not_null()
                            .default(DEFAULT_STATUS),
                    )
                    .col(
                        ColumnDef::new(TodoTask::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TodoTask::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TodoTask::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TodoTask {
    #[sea_orm(iden = "todo_tasks")]
    Table,
    Id,
    Title,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}
