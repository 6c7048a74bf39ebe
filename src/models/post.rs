use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One content-publication event. Bulk entry creates one row per unit of
/// quantity, so several rows may share the same date/talent/account/product.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub talent_id: String,
    pub talent_name: String,
    pub account_id: String,
    pub account_name: String,
    pub product_id: String,
    pub product_name: String,
    pub date: String,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl crate::domain::Record for Model {
    const COLLECTION: &'static str = "posts";
}
