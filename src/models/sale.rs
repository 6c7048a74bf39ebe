use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate daily traffic/revenue rows for an account.
pub const TYPE_OVERALL: &str = "Overall";
/// Revenue/quantity rows attributed to one specific product.
pub const TYPE_PRODUCT: &str = "Product";

pub const TYPES: [&str; 2] = [TYPE_OVERALL, TYPE_PRODUCT];
pub const STATUSES: [&str; 3] = ["Pending", "Completed", "Cancelled"];

/// Product label written on Overall rows, kept verbatim so existing stored
/// data and exports line up.
pub const OVERALL_PRODUCT_NAME: &str = "Performa Keseluruhan";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub r#type: String, // 'Overall', 'Product'
    pub date: String,
    pub talent_id: String,
    pub talent_name: String,
    pub account_id: String,
    pub account_name: String,
    pub product_id: Option<String>, // only for 'Product' rows
    pub product_name: String,
    pub revenue: Option<f64>,
    pub commission: Option<f64>,
    pub quantity: Option<i64>,
    pub views: Option<i64>, // traffic metrics, only for 'Overall' rows
    pub clicks: Option<i64>,
    pub status: String, // 'Pending', 'Completed', 'Cancelled'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl crate::domain::Record for Model {
    const COLLECTION: &'static str = "sales";
}
