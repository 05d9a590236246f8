use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
