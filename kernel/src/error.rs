use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Resource {
    User,
    Movie,
    Rental,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound(Resource),
    PendingRental,
    InsufficientAge,
    MovieInRental,
    Validation,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound(Resource::User) => write!(f, "User not found"),
            KernelError::NotFound(Resource::Movie) => write!(f, "Movie not found"),
            KernelError::NotFound(Resource::Rental) => write!(f, "Rental not found."),
            KernelError::PendingRental => write!(f, "The user already have a rental!"),
            KernelError::InsufficientAge => {
                write!(f, "Cannot rent adult movies if you are under 18 years old.")
            }
            KernelError::MovieInRental => write!(f, "Movie already in a rental."),
            KernelError::Validation => write!(f, "Please select at least 1 movie to rent."),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
