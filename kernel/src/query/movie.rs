use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Movie, MovieId, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError>;

    async fn find_by_rental_id(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Movie>, KernelError>;
}

pub trait DependOnMovieQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieQuery: MovieQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_query(&self) -> &Self::MovieQuery;
}
