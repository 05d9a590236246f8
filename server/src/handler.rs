use driver::database::{
    PostgresDatabase, PostgresMovieRepository, PostgresRentalRepository, PostgresUserRepository,
};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnMovieModifier, DependOnRentalModifier};
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

/// Wires the postgres stores into the rental services.
pub struct Handler {
    pgpool: PostgresDatabase,
    users: PostgresUserRepository,
    movies: PostgresMovieRepository,
    rentals: PostgresRentalRepository,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            users: PostgresUserRepository,
            movies: PostgresMovieRepository,
            rentals: PostgresRentalRepository,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &self.users
    }
}

impl DependOnMovieQuery for Handler {
    type MovieQuery = PostgresMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &self.movies
    }
}

impl DependOnMovieModifier for Handler {
    type MovieModifier = PostgresMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &self.movies
    }
}

impl DependOnRentalQuery for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &self.rentals
    }
}

impl DependOnRentalModifier for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &self.rentals
    }
}
