use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allowed values for `status`.
pub const STATUSES: [&str; 2] = ["Active", "Inactive"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "talents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub niche: String,
    pub status: String, // 'Active', 'Inactive'
    pub join_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl crate::domain::Record for Model {
    const COLLECTION: &'static str = "talents";
}
