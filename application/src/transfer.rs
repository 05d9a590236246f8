mod movie;
mod rental;

pub use self::{movie::*, rental::*};
