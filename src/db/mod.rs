use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};

mod complaints;
mod errors;
mod food_items;
mod memory;
mod orders;
pub mod schema;
mod users;

pub use complaints::ComplaintOperations;
pub use errors::RepositoryError;
pub use food_items::FoodItemOperations;
pub use memory::MemoryStore;
pub use orders::OrderOperations;
pub use users::UserOperations;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(database_url: &str, max_size: u32) -> Result<PgPool, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder().max_size(max_size).build(manager).map_err(|e| {
        error!("establish_connection_pool: failed to build pool: {}", e);
        RepositoryError::ConnectionPoolError(e)
    })
}

pub fn run_db_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
    info!("run_db_migrations: applied {} migrations", applied.len());
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &PgPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
