mod rental;

pub use self::rental::*;

#[cfg(test)]
mod mock;
