/// Fixed rental policy.
pub struct RentalLimitations;

impl RentalLimitations {
    pub const MIN_MOVIES: usize = 1;
    pub const MAX_MOVIES: usize = 4;
    pub const RENTAL_DAYS_LIMIT: i64 = 3;
    /// In minor currency units.
    pub const DELINQUENT_FEE_PER_DAY: i64 = 300;

    pub fn accepts_movie_count(count: usize) -> bool {
        (Self::MIN_MOVIES..=Self::MAX_MOVIES).contains(&count)
    }
}
