//! Repository layer for the accounts domain
//!
//! All queries are runtime `sqlx::query_as` against Postgres; row mapping
//! comes from `#[derive(sqlx::FromRow)]` on the entities.

pub mod teams;
pub mod transactions;
pub mod users;

pub use teams::TeamRepository;
pub use transactions::{create_membership_tx, create_team_tx};
pub use users::UserRepository;

use sqlx::{PgPool, Postgres, Transaction};

/// Bundle of repositories sharing one pool.
#[derive(Clone)]
pub struct AccountsRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub teams: TeamRepository,
}

impl AccountsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction for multi-statement writes.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
