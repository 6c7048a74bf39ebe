//! Filter engine - in-memory narrowing of fully fetched collections.
//!
//! All predicates are pure and AND-ed; an absent predicate always matches.
//! Input order is preserved throughout.

use chrono::{Datelike, NaiveDate};

use crate::domain::ReportContext;
use crate::models::{account, post, product, sale};

/// True when `date` (ISO `YYYY-MM-DD`) falls in the zero-indexed `month`
/// of `year`. Dates that do not parse never match.
pub fn in_period(date: &str, month: u32, year: i32) -> bool {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.month0() == month && d.year() == year,
        Err(_) => false,
    }
}

/// Case-insensitive substring match; an empty query matches everything.
pub fn text_matches(value: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    value.to_lowercase().contains(&query.to_lowercase())
}

/// Overall-type sales in the context period.
pub fn overall_sales_in<'a>(
    sales: &'a [sale::Model],
    ctx: &ReportContext,
) -> Vec<&'a sale::Model> {
    sales
        .iter()
        .filter(|s| {
            s.r#type == sale::TYPE_OVERALL
                && in_period(&s.date, ctx.month, ctx.year)
                && ctx.matches(&s.talent_id, &s.account_id)
        })
        .collect()
}

/// Product-type sales in the context period.
pub fn product_sales_in<'a>(
    sales: &'a [sale::Model],
    ctx: &ReportContext,
) -> Vec<&'a sale::Model> {
    sales
        .iter()
        .filter(|s| {
            s.r#type == sale::TYPE_PRODUCT
                && in_period(&s.date, ctx.month, ctx.year)
                && ctx.matches(&s.talent_id, &s.account_id)
        })
        .collect()
}

/// Posts in the context period.
pub fn posts_in<'a>(posts: &'a [post::Model], ctx: &ReportContext) -> Vec<&'a post::Model> {
    posts
        .iter()
        .filter(|p| {
            in_period(&p.date, ctx.month, ctx.year) && ctx.matches(&p.talent_id, &p.account_id)
        })
        .collect()
}

/// Products matching the context. A product has no talent of its own: the
/// talent predicate goes through the owning account, and products whose
/// account no longer exists are excluded.
pub fn products_in<'a>(
    products: &'a [product::Model],
    accounts: &[account::Model],
    ctx: &ReportContext,
) -> Vec<&'a product::Model> {
    products
        .iter()
        .filter(|p| {
            accounts
                .iter()
                .find(|a| a.id == p.account_id)
                .is_some_and(|a| ctx.matches(&a.talent_id, &p.account_id))
        })
        .collect()
}

/// Accounts matching the context; an account matches the account predicate
/// with its own id.
pub fn accounts_in<'a>(
    accounts: &'a [account::Model],
    ctx: &ReportContext,
) -> Vec<&'a account::Model> {
    accounts
        .iter()
        .filter(|a| ctx.matches(&a.talent_id, &a.id))
        .collect()
}

/// Accounts owned by one talent; backs the dependent account choice in the
/// entry forms.
pub fn available_accounts<'a>(
    accounts: &'a [account::Model],
    talent_id: &str,
) -> Vec<&'a account::Model> {
    accounts
        .iter()
        .filter(|a| a.talent_id == talent_id)
        .collect()
}

/// Post-listing filter: calendar period plus free-text lookups against the
/// snapshotted talent and product names.
pub fn filter_posts<'a>(
    posts: &'a [post::Model],
    month: u32,
    year: i32,
    talent_query: &str,
    product_query: &str,
) -> Vec<&'a post::Model> {
    posts
        .iter()
        .filter(|p| {
            in_period(&p.date, month, year)
                && text_matches(&p.talent_name, talent_query)
                && text_matches(&p.product_name, product_query)
        })
        .collect()
}

/// Sale-listing filter: type tab, inclusive ISO date range (lexicographic
/// compare is chronological for `YYYY-MM-DD`), talent and account ids.
pub fn filter_sales<'a>(
    sales: &'a [sale::Model],
    sale_type: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    talent_id: Option<&str>,
    account_id: Option<&str>,
) -> Vec<&'a sale::Model> {
    sales
        .iter()
        .filter(|s| {
            if let Some(t) = sale_type {
                if s.r#type != t {
                    return false;
                }
            }
            if let Some(start) = start_date {
                if s.date.as_str() < start {
                    return false;
                }
            }
            if let Some(end) = end_date {
                if s.date.as_str() > end {
                    return false;
                }
            }
            if let Some(t) = talent_id {
                if s.talent_id != t {
                    return false;
                }
            }
            if let Some(a) = account_id {
                if s.account_id != a {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// How many posts a talent already has on `date`. Shown as live feedback in
/// the entry form; informational, not an enforced limit.
pub fn posts_on_day(posts: &[post::Model], talent_id: &str, date: &str) -> usize {
    posts
        .iter()
        .filter(|p| p.talent_id == talent_id && p.date == date)
        .count()
}
