use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Rental, RentalId, RentalPeriod, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Inserts an open rental; the store assigns its id.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Rental, KernelError>;

    async fn close(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
