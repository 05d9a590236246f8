use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{MovieId, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Associates the movie with `rental_id` only if it is still available.
    /// Returns `false` when another rental already holds it.
    async fn claim(
        &self,
        con: &mut Self::Transaction,
        id: &MovieId,
        rental_id: &RentalId,
    ) -> error_stack::Result<bool, KernelError>;

    async fn release_by_rental(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMovieModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieModifier: MovieModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
