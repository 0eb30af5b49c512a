use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Natural key. Writes to an existing filename replace its content.
    #[sea_orm(unique)]
    pub filename: String,

    #[sea_orm(column_type = "Text")]
    pub markdown_content: String,

    /// Set on first insert only.
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
