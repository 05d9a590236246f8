mod birth_date;
mod cpf;
mod email;
mod id;
mod name;

pub use self::{birth_date::*, cpf::*, email::*, id::*, name::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    first_name: FirstName,
    last_name: LastName,
    email: UserEmail,
    cpf: UserCpf,
    birth_date: BirthDate,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: FirstName,
        last_name: LastName,
        email: UserEmail,
        cpf: UserCpf,
        birth_date: BirthDate,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            cpf,
            birth_date,
        }
    }

    pub fn is_adult_at(&self, today: Date) -> bool {
        self.birth_date.age_at(today) >= ADULT_AGE
    }
}
