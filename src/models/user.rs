use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employers carry no phone; candidates are addressed by theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub user_group_id: i32,
    pub name: String,
    pub phone: Option<String>,
}
