use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery, MovieQuery, RentalQuery,
    UserQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{MovieId, RentalId, RentalLimitations, RentalPeriod, UserId};
use kernel::{KernelError, Resource};

use crate::transfer::{
    CreateRentalDto, FinishRentalDto, FinishedRentalDto, GetRentalDto, MovieDto, RentalDetailDto,
    RentalDto,
};

#[async_trait::async_trait]
pub trait GetRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnMovieQuery
{
    async fn get_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rentals = self.rental_query().find_all(&mut connection).await?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<RentalDetailDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound(Resource::Rental)))?;
        let movies = self
            .movie_query()
            .find_by_rental_id(&mut connection, &id)
            .await?;

        Ok(RentalDetailDto {
            rental: RentalDto::from(rental),
            movies: movies.into_iter().map(MovieDto::from).collect(),
        })
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery + DependOnMovieQuery {}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnMovieQuery
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnMovieModifier
{
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        if !RentalLimitations::accepts_movie_count(dto.movie_ids.len()) {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "{} movies requested, between {} and {} allowed",
                dto.movie_ids.len(),
                RentalLimitations::MIN_MOVIES,
                RentalLimitations::MAX_MOVIES
            )));
        }

        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound(Resource::User)))?;

        let rentals = self
            .rental_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;
        if let Some(pending) = rentals.iter().find(|rental| rental.is_open()) {
            tracing::debug!(user = dto.user_id, rental = ?pending.id(), "user has an open rental");
            return Err(Report::new(KernelError::PendingRental));
        }

        let now = OffsetDateTime::now_utc();
        let is_minor = !user.is_adult_at(now.date());

        let movie_ids = dto
            .movie_ids
            .iter()
            .copied()
            .map(MovieId::new)
            .collect::<Vec<_>>();
        for movie_id in &movie_ids {
            let movie = self
                .movie_query()
                .find_by_id(&mut connection, movie_id)
                .await?
                .ok_or_else(|| Report::new(KernelError::NotFound(Resource::Movie)))?;
            if movie.is_adults_only() && is_minor {
                return Err(Report::new(KernelError::InsufficientAge)
                    .attach_printable(format!("movie {:?} is adults only", movie_id)));
            }
            if !movie.is_available() {
                return Err(
                    Report::new(KernelError::MovieInRental).attach_printable(format!(
                        "movie {:?} is held by {:?}",
                        movie_id,
                        movie.rental_id()
                    )),
                );
            }
        }

        let rental = self
            .rental_modifier()
            .create(&mut connection, &user_id, &RentalPeriod::starting_at(now))
            .await?;
        for movie_id in &movie_ids {
            let claimed = self
                .movie_modifier()
                .claim(&mut connection, movie_id, rental.id())
                .await?;
            if !claimed {
                connection.roll_back().await?;
                return Err(Report::new(KernelError::MovieInRental).attach_printable(format!(
                    "movie {:?} was claimed by another rental",
                    movie_id
                )));
            }
        }

        connection.commit().await?;

        tracing::info!(
            rental = ?rental.id(),
            user = dto.user_id,
            movies = movie_ids.len(),
            "rental created"
        );
        Ok(RentalDto::from(rental))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnUserQuery
        + DependOnMovieQuery
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnMovieModifier
{
}

#[async_trait::async_trait]
pub trait FinishRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
    async fn finish_rental(
        &self,
        dto: FinishRentalDto,
    ) -> error_stack::Result<FinishedRentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.rental_id);
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound(Resource::Rental)))?;

        let fee = rental.late_fee_at(OffsetDateTime::now_utc());

        self.rental_modifier().close(&mut connection, &id).await?;
        self.movie_modifier()
            .release_by_rental(&mut connection, &id)
            .await?;

        connection.commit().await?;

        tracing::info!(
            rental = dto.rental_id,
            overdue_days = *fee.overdue_days(),
            "rental finished"
        );
        Ok(FinishedRentalDto::new(dto.rental_id, fee))
    }
}

impl<T> FinishRentalService for T where
    T: DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
}
