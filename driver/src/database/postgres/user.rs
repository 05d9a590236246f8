use sqlx::PgConnection;
use time::Date;

use kernel::interface::query::UserQuery;
use kernel::prelude::entity::{
    BirthDate, FirstName, LastName, User, UserCpf, UserEmail, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    cpf: String,
    birth_date: Date,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::new(row.id),
            FirstName::new(row.first_name),
            LastName::new(row.last_name),
            UserEmail::new(row.email),
            UserCpf::new(row.cpf),
            BirthDate::new(row.birth_date),
        )
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, email, cpf, birth_date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(User::from);
        Ok(found)
    }
}
