use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allowed values for `platform`.
pub const PLATFORMS: [&str; 4] = ["Instagram", "TikTok", "YouTube", "Shopee Video"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub talent_id: String,
    pub talent_name: String, // snapshot of the owning talent's name at write time
    pub platform: String,    // 'Instagram', 'TikTok', 'YouTube', 'Shopee Video'
    pub username: String,
    pub followers: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl crate::domain::Record for Model {
    const COLLECTION: &'static str = "accounts";
}
