//! Post service - bulk creation from a cart and single-post edits.

use futures::future::join_all;

use crate::domain::{DomainError, RecordStore};
use crate::models::{account, post, product, talent};
use crate::services::cart::Cart;

/// Shared context stamped onto every post created by one cart submit.
#[derive(Debug, Clone)]
pub struct PostContext {
    pub date: String,
    pub talent_id: String,
    pub talent_name: String,
    pub account_id: String,
    pub account_name: String,
}

/// Resolves the submitted talent/account pair and snapshots their display
/// names at write time. The account must belong to the talent.
pub fn resolve_context(
    date: &str,
    talent_id: &str,
    account_id: &str,
    talents: &[talent::Model],
    accounts: &[account::Model],
) -> Result<PostContext, DomainError> {
    let talent = talents
        .iter()
        .find(|t| t.id == talent_id)
        .ok_or_else(|| DomainError::Validation("unknown talent".to_owned()))?;
    let account = accounts
        .iter()
        .find(|a| a.id == account_id)
        .ok_or_else(|| DomainError::Validation("unknown account".to_owned()))?;
    if account.talent_id != talent.id {
        return Err(DomainError::Validation(
            "account does not belong to the selected talent".to_owned(),
        ));
    }
    Ok(PostContext {
        date: date.to_owned(),
        talent_id: talent.id.clone(),
        talent_name: talent.name.clone(),
        account_id: account.id.clone(),
        account_name: account.username.clone(),
    })
}

/// Builds a cart from submitted (product, quantity) pairs. Every product
/// must exist and be linked to the context account; quantities below 1 are
/// rejected before they reach the cart.
pub fn build_cart(
    items: &[(String, u32)],
    account_id: &str,
    products: &[product::Model],
) -> Result<Cart, DomainError> {
    let mut cart = Cart::new();
    for (product_id, quantity) in items {
        let product = products
            .iter()
            .find(|p| p.id == *product_id)
            .ok_or_else(|| DomainError::Validation(format!("unknown product {product_id}")))?;
        if product.account_id != account_id {
            return Err(DomainError::Validation(format!(
                "product {} is not linked to the selected account",
                product.name
            )));
        }
        if *quantity < 1 {
            return Err(DomainError::Validation(
                "quantity must be at least 1".to_owned(),
            ));
        }
        cart.add(&product.id, &product.name);
        cart.adjust(&product.id, i64::from(*quantity) - 1);
    }
    Ok(cart)
}

/// Expands the cart into one draft per unit of quantity, all sharing the
/// context and starting with zeroed engagement counters.
pub fn drafts(cart: &Cart, ctx: &PostContext) -> Vec<post::Model> {
    let mut out = Vec::with_capacity(cart.total_quantity() as usize);
    for entry in cart.items() {
        for _ in 0..entry.quantity {
            out.push(post::Model {
                id: String::new(),
                talent_id: ctx.talent_id.clone(),
                talent_name: ctx.talent_name.clone(),
                account_id: ctx.account_id.clone(),
                account_name: ctx.account_name.clone(),
                product_id: entry.product_id.clone(),
                product_name: entry.product_name.clone(),
                date: ctx.date.clone(),
                views: Some(0),
                likes: Some(0),
                comments: Some(0),
                link: None,
            });
        }
    }
    out
}

/// Submits the cart: one independent create call per unit of quantity, all
/// dispatched concurrently and awaited together. There is no atomicity
/// across the calls - creates that succeeded before a failure stay
/// persisted and are not compensated.
pub async fn create_posts(
    store: &dyn RecordStore<post::Model>,
    cart: &Cart,
    ctx: &PostContext,
) -> Result<usize, DomainError> {
    let drafts = drafts(cart, ctx);
    let total = drafts.len();
    let results = join_all(drafts.into_iter().map(|draft| store.create(draft))).await;

    let mut created = 0;
    let mut first_err = None;
    for result in results {
        match result {
            Ok(_) => created += 1,
            Err(e) => {
                tracing::error!("post create failed: {}", e);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }

    match first_err {
        Some(e) => {
            tracing::warn!("bulk post entry persisted {}/{} records", created, total);
            Err(e)
        }
        None => Ok(created),
    }
}

/// Edit mode touches exactly one existing post: the date/talent/account
/// context and the product are replaced in a single update call, the
/// engagement counters are carried over untouched.
pub async fn update_post(
    store: &dyn RecordStore<post::Model>,
    id: &str,
    ctx: &PostContext,
    product_id: &str,
    products: &[product::Model],
) -> Result<(), DomainError> {
    let posts = store.list().await?;
    let existing = posts
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(DomainError::NotFound)?;

    let product_name = products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown".to_owned());

    let updated = post::Model {
        id: existing.id.clone(),
        talent_id: ctx.talent_id.clone(),
        talent_name: ctx.talent_name.clone(),
        account_id: ctx.account_id.clone(),
        account_name: ctx.account_name.clone(),
        product_id: product_id.to_owned(),
        product_name,
        date: ctx.date.clone(),
        views: existing.views,
        likes: existing.likes,
        comments: existing.comments,
        link: existing.link,
    };
    store.update(id, updated).await
}
