use std::sync::{Arc, Mutex, MutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery, MovieQuery, RentalQuery,
    UserQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{
    AdultsOnly, BirthDate, EndDate, FirstName, IsClosed, LastName, Movie, MovieId, MovieName,
    Rental, RentalDate, RentalId, RentalLimitations, RentalPeriod, User, UserCpf, UserEmail,
    UserId,
};
use kernel::KernelError;
use time::{Date, Duration, Month, OffsetDateTime};

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub movies: Vec<Movie>,
    pub rentals: Vec<Rental>,
}

/// In-memory stand-in for every store the rental services depend on.
#[derive(Clone, Default)]
pub struct MockModule {
    tables: Arc<Mutex<Tables>>,
}

impl MockModule {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn add_user(&self, id: i32, birth_date: Date) {
        self.tables().users.push(User::new(
            UserId::new(id),
            FirstName::new("Ana"),
            LastName::new("Silva"),
            UserEmail::new(format!("user{id}@example.com")),
            UserCpf::new(format!("{id:011}")),
            BirthDate::new(birth_date),
        ));
    }

    pub fn add_adult(&self, id: i32) {
        self.add_user(id, years_ago(25));
    }

    pub fn add_minor(&self, id: i32) {
        self.add_user(id, years_ago(15));
    }

    pub fn add_movie(&self, id: i32, adults_only: bool, rental_id: Option<i32>) {
        self.tables().movies.push(Movie::new(
            MovieId::new(id),
            MovieName::new(format!("Movie {id}")),
            AdultsOnly::new(adults_only),
            rental_id.map(RentalId::new),
        ));
    }

    pub fn add_rental(&self, id: i32, user_id: i32, end_date: OffsetDateTime, closed: bool) {
        self.tables().rentals.push(Rental::new(
            RentalId::new(id),
            UserId::new(user_id),
            RentalDate::new(end_date - Duration::days(RentalLimitations::RENTAL_DAYS_LIMIT)),
            EndDate::new(end_date),
            IsClosed::new(closed),
        ));
    }

    pub fn movie(&self, id: i32) -> Option<Movie> {
        let id = MovieId::new(id);
        self.tables().movies.iter().find(|m| m.id() == &id).cloned()
    }

    pub fn rental(&self, id: i32) -> Option<Rental> {
        let id = RentalId::new(id);
        self.tables().rentals.iter().find(|r| r.id() == &id).cloned()
    }
}

/// First of January, `years` calendar years back.
pub fn years_ago(years: i32) -> Date {
    let year = OffsetDateTime::now_utc().year() - years;
    Date::from_calendar_date(year, Month::January, 1).unwrap()
}

/// Works on a private copy of the tables; `commit` publishes it, dropping discards it.
pub struct MockTransaction {
    shared: Arc<Mutex<Tables>>,
    staged: Tables,
}

impl MockTransaction {
    fn tables(&mut self) -> &mut Tables {
        &mut self.staged
    }
}

#[async_trait::async_trait]
impl Transaction for MockTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        *self.shared.lock().unwrap() = self.staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MockModule {
    type Transaction = MockTransaction;
    async fn transact(&self) -> error_stack::Result<MockTransaction, KernelError> {
        Ok(MockTransaction {
            shared: self.tables.clone(),
            staged: self.tables().clone(),
        })
    }
}

#[async_trait::async_trait]
impl UserQuery for MockModule {
    type Transaction = MockTransaction;
    async fn find_by_id(
        &self,
        con: &mut MockTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.tables().users.iter().find(|u| u.id() == id).cloned())
    }
}

#[async_trait::async_trait]
impl MovieQuery for MockModule {
    type Transaction = MockTransaction;
    async fn find_by_id(
        &self,
        con: &mut MockTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.tables().movies.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_by_rental_id(
        &self,
        con: &mut MockTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        Ok(con
            .tables()
            .movies
            .iter()
            .filter(|m| m.rental_id().as_ref() == Some(rental_id))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MockModule {
    type Transaction = MockTransaction;
    async fn find_all(
        &self,
        con: &mut MockTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        Ok(con.tables().rentals.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut MockTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.tables().rentals.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_user_id(
        &self,
        con: &mut MockTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        Ok(con
            .tables()
            .rentals
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalModifier for MockModule {
    type Transaction = MockTransaction;
    async fn create(
        &self,
        con: &mut MockTransaction,
        user_id: &UserId,
        period: &RentalPeriod,
    ) -> error_stack::Result<Rental, KernelError> {
        let tables = con.tables();
        let id = RentalId::new(tables.rentals.len() as i32 + 1);
        let rental = Rental::new(
            id,
            *user_id,
            *period.date(),
            *period.end_date(),
            IsClosed::new(false),
        );
        tables.rentals.push(rental.clone());
        Ok(rental)
    }

    async fn close(
        &self,
        con: &mut MockTransaction,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        let tables = con.tables();
        tables.rentals = std::mem::take(&mut tables.rentals)
            .into_iter()
            .map(|rental| {
                if rental.id() == id {
                    rental.reconstruct(|r| r.closed = IsClosed::new(true))
                } else {
                    rental
                }
            })
            .collect();
        Ok(())
    }
}

#[async_trait::async_trait]
impl MovieModifier for MockModule {
    type Transaction = MockTransaction;
    async fn claim(
        &self,
        con: &mut MockTransaction,
        id: &MovieId,
        rental_id: &RentalId,
    ) -> error_stack::Result<bool, KernelError> {
        let tables = con.tables();
        let Some(movie) = tables.movies.iter_mut().find(|m| m.id() == id) else {
            return Ok(false);
        };
        if !movie.is_available() {
            return Ok(false);
        }
        *movie = movie
            .clone()
            .reconstruct(|m| m.rental_id = Some(*rental_id));
        Ok(true)
    }

    async fn release_by_rental(
        &self,
        con: &mut MockTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        let tables = con.tables();
        tables.movies = std::mem::take(&mut tables.movies)
            .into_iter()
            .map(|movie| {
                if movie.rental_id().as_ref() == Some(rental_id) {
                    movie.reconstruct(|m| m.rental_id = None)
                } else {
                    movie
                }
            })
            .collect();
        Ok(())
    }
}

impl DependOnUserQuery for MockModule {
    type UserQuery = Self;
    fn user_query(&self) -> &Self::UserQuery {
        self
    }
}

impl DependOnMovieQuery for MockModule {
    type MovieQuery = Self;
    fn movie_query(&self) -> &Self::MovieQuery {
        self
    }
}

impl DependOnRentalQuery for MockModule {
    type RentalQuery = Self;
    fn rental_query(&self) -> &Self::RentalQuery {
        self
    }
}

impl DependOnRentalModifier for MockModule {
    type RentalModifier = Self;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        self
    }
}

impl DependOnMovieModifier for MockModule {
    type MovieModifier = Self;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        self
    }
}
