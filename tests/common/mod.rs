use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::ContainerAsync;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

/// A disposable Postgres instance with the todo schema applied.
pub struct TestContext {
    // Dropping the container tears the database down, so it is held for the
    // lifetime of the test.
    #[allow(dead_code)]
    pub container: ContainerAsync<Postgres>,
    pub db: DatabaseConnection,
}

/// Starts a throwaway Postgres container, connects to it and applies the
/// todo migrations.
pub async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();

    let container = Postgres::default().start().await?;
    let db_url = format!(
        "postgres://postgres:postgres@{}:{}/postgres",
        container.get_host().await?,
        container.get_host_port_ipv4(5432).await?
    );
    let db = Database::connect(&db_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(TestContext { container, db })
}
