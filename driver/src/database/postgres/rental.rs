use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    EndDate, IsClosed, Rental, RentalDate, RentalId, RentalPeriod, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Rental, KernelError> {
        PgRentalInternal::create(con, user_id, period).await
    }

    async fn close(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::close(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i32,
    user_id: i32,
    date: OffsetDateTime,
    end_date: OffsetDateTime,
    closed: bool,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            UserId::new(value.user_id),
            RentalDate::new(value.date),
            EndDate::new(value.end_date),
            IsClosed::new(value.closed),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                user_id,
                date,
                end_date,
                closed
            FROM
                rentals
            ORDER BY
                id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                user_id,
                date,
                end_date,
                closed
            FROM
                rentals
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                user_id,
                date,
                end_date,
                closed
            FROM
                rentals
            WHERE
                user_id = $1
            ORDER BY
                id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        user_id: &UserId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Rental, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            INSERT INTO rentals (user_id, date, end_date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, date, end_date, closed
            "#,
        )
        .bind(user_id.as_ref())
        .bind(period.date().as_ref())
        .bind(period.end_date().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Rental::from(row))
    }

    async fn close(con: &mut PgConnection, id: &RentalId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET closed = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
