//! Sale service - turns a submitted entry into a stored sale record.

use chrono::NaiveDate;

use crate::domain::DomainError;
use crate::models::{account, product, sale, talent};

/// A sale entry as submitted by the form, before name snapshotting.
#[derive(Debug, Clone)]
pub struct SaleInput {
    pub r#type: String,
    pub date: String,
    pub talent_id: String,
    pub account_id: String,
    pub product_id: Option<String>,
    pub revenue: Option<f64>,
    pub commission: Option<f64>,
    pub quantity: Option<i64>,
    pub views: Option<i64>,
    pub clicks: Option<i64>,
    pub status: String,
}

/// Validates the entry and snapshots display names from the referenced
/// records. The sale type decides which optional fields are kept: traffic
/// metrics only on Overall rows, a product reference only on Product rows.
/// Missing references degrade to the "Unknown" label rather than failing,
/// matching how the entry forms behave.
pub fn build_sale(
    input: SaleInput,
    talents: &[talent::Model],
    accounts: &[account::Model],
    products: &[product::Model],
) -> Result<sale::Model, DomainError> {
    if !sale::TYPES.contains(&input.r#type.as_str()) {
        return Err(DomainError::Validation(format!(
            "invalid sale type '{}'",
            input.r#type
        )));
    }
    if !sale::STATUSES.contains(&input.status.as_str()) {
        return Err(DomainError::Validation(format!(
            "invalid sale status '{}'",
            input.status
        )));
    }
    if NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_err() {
        return Err(DomainError::Validation(format!(
            "invalid date '{}'",
            input.date
        )));
    }

    let talent_name = talents
        .iter()
        .find(|t| t.id == input.talent_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Unknown".to_owned());
    let account_name = accounts
        .iter()
        .find(|a| a.id == input.account_id)
        .map(|a| a.username.clone())
        .unwrap_or_else(|| "Unknown".to_owned());

    let (product_id, product_name, views, clicks) = if input.r#type == sale::TYPE_PRODUCT {
        let product_id = input.product_id.filter(|id| !id.is_empty()).ok_or_else(|| {
            DomainError::Validation("a product is required for Product sales".to_owned())
        })?;
        let product_name = products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_owned());
        (Some(product_id), product_name, None, None)
    } else {
        (
            None,
            sale::OVERALL_PRODUCT_NAME.to_owned(),
            Some(input.views.unwrap_or(0)),
            Some(input.clicks.unwrap_or(0)),
        )
    };

    Ok(sale::Model {
        id: String::new(),
        r#type: input.r#type,
        date: input.date,
        talent_id: input.talent_id,
        talent_name,
        account_id: input.account_id,
        account_name,
        product_id,
        product_name,
        revenue: Some(input.revenue.unwrap_or(0.0)),
        commission: Some(input.commission.unwrap_or(0.0)),
        quantity: Some(input.quantity.unwrap_or(0)),
        views,
        clicks,
        status: input.status,
    })
}
