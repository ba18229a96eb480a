use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const EMPLOYER_GROUP: &str = "employer";
pub const CANDIDATE_GROUP: &str = "candidate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserGroup {
    pub id: i32,
    pub name: String,
}
