mod movie;
mod rental;
mod user;

pub use self::{movie::*, rental::*, user::*};
use crate::env;
use crate::error::ConvertError;
use error_stack::ResultExt;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;
use sqlx::{PgConnection, Pool, Postgres};
use std::ops::{Deref, DerefMut};

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url)
            .await
            .convert_error()
            .attach_printable_lazy(|| "Failed to connect postgres")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!().run(&self.pool).await.convert_error()?;
        tracing::debug!("postgres migrations applied");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use kernel::prelude::entity::{MovieId, UserId};
    use rand::Rng;
    use sqlx::PgConnection;
    use time::macros::date;
    use time::Date;

    use crate::error::ConvertError;

    pub async fn insert_user(
        con: &mut PgConnection,
        birth_date: Date,
    ) -> error_stack::Result<UserId, kernel::KernelError> {
        let suffix: u32 = rand::thread_rng().gen();
        let id: i32 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO users (first_name, last_name, email, cpf, birth_date)
            VALUES ('Ana', 'Silva', $1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(format!("ana{suffix}@example.com"))
        .bind(format!("{suffix:011}"))
        .bind(birth_date)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(UserId::new(id))
    }

    pub async fn insert_adult(
        con: &mut PgConnection,
    ) -> error_stack::Result<UserId, kernel::KernelError> {
        insert_user(con, date!(1990 - 01 - 01)).await
    }

    pub async fn insert_movie(
        con: &mut PgConnection,
        adults_only: bool,
    ) -> error_stack::Result<MovieId, kernel::KernelError> {
        let id: i32 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO movies (name, adults_only)
            VALUES ('Movie', $1)
            RETURNING id
            "#,
        )
        .bind(adults_only)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(MovieId::new(id))
    }
}
