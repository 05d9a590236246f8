use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Rental, RentalId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;

    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}
