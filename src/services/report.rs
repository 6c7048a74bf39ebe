//! Aggregation engine - folds filtered collections into the dashboard
//! summary: headline totals, per-talent activity, per-account and
//! per-product performance, and the daily revenue trend.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ReportContext;
use crate::models::{account, post, product, sale, talent};
use crate::services::filter;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentActivity {
    pub id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub id: String,
    pub username: String,
    pub platform: String,
    pub talent_name: String,
    pub revenue: f64,
    pub post_count: usize,
    pub product_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub id: String,
    pub name: String,
    pub account_name: String,
    pub period_posts: usize,
    pub period_qty: i64,
    pub period_revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub day: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_views: i64,
    pub total_posts: usize,
    pub total_products: usize,
    pub talent_activity: Vec<TalentActivity>,
    pub account_stats: Vec<AccountStats>,
    pub top_accounts: Vec<AccountStats>,
    pub product_stats: Vec<ProductStats>,
    pub daily_trend: Vec<DailyRevenue>,
}

/// Metric fields may be absent on stored records; absence counts as zero.
fn revenue_of(s: &sale::Model) -> f64 {
    s.revenue.unwrap_or(0.0)
}

/// Number of days in the zero-indexed `month` of `year` (leap years
/// included). Out-of-range months yield zero days.
fn days_in_month(month: u32, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1);
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// Builds the full dashboard summary from the five collections.
///
/// `talents`, `accounts`, `products`, `posts` and `sales` are the complete,
/// unfiltered collections; the context narrows them in memory. Account
/// product counts are lifetime figures and deliberately not period-bound.
pub fn build_summary(
    ctx: &ReportContext,
    talents: &[talent::Model],
    accounts: &[account::Model],
    products: &[product::Model],
    posts: &[post::Model],
    sales: &[sale::Model],
) -> DashboardSummary {
    let overall = filter::overall_sales_in(sales, ctx);
    let product_sales = filter::product_sales_in(sales, ctx);
    let period_posts = filter::posts_in(posts, ctx);
    let period_products = filter::products_in(products, accounts, ctx);
    let matched_accounts = filter::accounts_in(accounts, ctx);

    let total_revenue: f64 = overall.iter().map(|s| revenue_of(s)).sum();
    let total_views: i64 = overall.iter().map(|s| s.views.unwrap_or(0)).sum();

    let mut talent_activity: Vec<TalentActivity> = talents
        .iter()
        .map(|t| TalentActivity {
            id: t.id.clone(),
            name: t.name.clone(),
            count: period_posts.iter().filter(|p| p.talent_id == t.id).count(),
        })
        .filter(|t| t.count > 0)
        .collect();
    // stable sort: ties keep the original talent order
    talent_activity.sort_by(|a, b| b.count.cmp(&a.count));

    let account_stats: Vec<AccountStats> = matched_accounts
        .iter()
        .map(|acc| {
            let revenue: f64 = sales
                .iter()
                .filter(|s| {
                    s.account_id == acc.id
                        && s.r#type == sale::TYPE_OVERALL
                        && filter::in_period(&s.date, ctx.month, ctx.year)
                })
                .map(|s| revenue_of(s))
                .sum();
            let post_count = posts
                .iter()
                .filter(|p| p.account_id == acc.id && filter::in_period(&p.date, ctx.month, ctx.year))
                .count();
            let product_count = products.iter().filter(|p| p.account_id == acc.id).count();
            AccountStats {
                id: acc.id.clone(),
                username: acc.username.clone(),
                platform: acc.platform.clone(),
                talent_name: acc.talent_name.clone(),
                revenue,
                post_count,
                product_count,
            }
        })
        .collect();

    let mut top_accounts = account_stats.clone();
    top_accounts.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    top_accounts.truncate(5);

    let mut product_stats: Vec<ProductStats> = period_products
        .iter()
        .map(|prod| {
            let period_posts_count = period_posts
                .iter()
                .filter(|p| p.product_id == prod.id)
                .count();
            let own_sales: Vec<&&sale::Model> = product_sales
                .iter()
                .filter(|s| s.product_id.as_deref() == Some(prod.id.as_str()))
                .collect();
            let period_qty: i64 = own_sales.iter().map(|s| s.quantity.unwrap_or(0)).sum();
            let period_revenue: f64 = own_sales.iter().map(|s| revenue_of(s)).sum();
            ProductStats {
                id: prod.id.clone(),
                name: prod.name.clone(),
                account_name: prod.account_name.clone(),
                period_posts: period_posts_count,
                period_qty,
                period_revenue,
            }
        })
        .collect();
    product_stats.sort_by(|a, b| {
        b.period_revenue
            .partial_cmp(&a.period_revenue)
            .unwrap_or(Ordering::Equal)
    });

    let daily_trend: Vec<DailyRevenue> = (1..=days_in_month(ctx.month, ctx.year))
        .map(|day| {
            let date = format!("{:04}-{:02}-{:02}", ctx.year, ctx.month + 1, day);
            // exact string equality against the stored date, per day
            let revenue: f64 = overall
                .iter()
                .filter(|s| s.date == date)
                .map(|s| revenue_of(s))
                .sum();
            DailyRevenue { day, revenue }
        })
        .collect();

    DashboardSummary {
        total_revenue,
        total_views,
        total_posts: period_posts.len(),
        total_products: period_products.len(),
        talent_activity,
        account_stats,
        top_accounts,
        product_stats,
        daily_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talent(id: &str, name: &str) -> talent::Model {
        talent::Model {
            id: id.to_owned(),
            name: name.to_owned(),
            niche: "Beauty".to_owned(),
            status: "Active".to_owned(),
            join_date: "2024-01-01".to_owned(),
        }
    }

    fn account(id: &str, talent_id: &str, username: &str) -> account::Model {
        account::Model {
            id: id.to_owned(),
            talent_id: talent_id.to_owned(),
            talent_name: format!("Talent {talent_id}"),
            platform: "TikTok".to_owned(),
            username: username.to_owned(),
            followers: 1000,
        }
    }

    fn overall_sale(id: &str, account_id: &str, date: &str, revenue: Option<f64>) -> sale::Model {
        sale::Model {
            id: id.to_owned(),
            r#type: sale::TYPE_OVERALL.to_owned(),
            date: date.to_owned(),
            talent_id: "t1".to_owned(),
            talent_name: "Talent t1".to_owned(),
            account_id: account_id.to_owned(),
            account_name: format!("acct_{account_id}"),
            product_id: None,
            product_name: sale::OVERALL_PRODUCT_NAME.to_owned(),
            revenue,
            commission: Some(0.0),
            quantity: Some(0),
            views: Some(10),
            clicks: Some(2),
            status: "Completed".to_owned(),
        }
    }

    fn march_2024() -> ReportContext {
        ReportContext {
            month: 2,
            year: 2024,
            talent_id: None,
            account_id: None,
        }
    }

    #[test]
    fn missing_revenue_counts_as_zero() {
        let talents = vec![talent("t1", "Ayu")];
        let accounts = vec![account("a1", "t1", "ayu.beauty")];
        let sales = vec![
            overall_sale("s1", "a1", "2024-03-05", Some(100.0)),
            overall_sale("s2", "a1", "2024-03-06", None),
        ];
        let summary = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);
        assert_eq!(summary.total_revenue, 100.0);
    }

    #[test]
    fn revenue_total_is_order_independent() {
        let talents = vec![talent("t1", "Ayu")];
        let accounts = vec![account("a1", "t1", "ayu.beauty")];
        let mut sales = vec![
            overall_sale("s1", "a1", "2024-03-05", Some(100.0)),
            overall_sale("s2", "a1", "2024-03-06", Some(50.0)),
            overall_sale("s3", "a1", "2024-03-07", Some(25.0)),
        ];
        let forward = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);
        sales.reverse();
        let backward = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);
        assert_eq!(forward.total_revenue, backward.total_revenue);
    }

    #[test]
    fn top_accounts_sorted_descending_and_capped_at_five() {
        let talents = vec![talent("t1", "Ayu")];
        let accounts: Vec<account::Model> = (1..=7)
            .map(|i| account(&format!("a{i}"), "t1", &format!("acct{i}")))
            .collect();
        let sales: Vec<sale::Model> = (1..=7)
            .map(|i| {
                overall_sale(
                    &format!("s{i}"),
                    &format!("a{i}"),
                    "2024-03-05",
                    Some(i as f64 * 10.0),
                )
            })
            .collect();
        let summary = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);
        assert_eq!(summary.top_accounts.len(), 5);
        let revenues: Vec<f64> = summary.top_accounts.iter().map(|a| a.revenue).collect();
        assert_eq!(revenues, vec![70.0, 60.0, 50.0, 40.0, 30.0]);
    }

    #[test]
    fn account_revenue_ignores_context_talent_but_respects_period() {
        // per-account revenue is scoped by account and period only
        let talents = vec![talent("t1", "Ayu")];
        let accounts = vec![account("a1", "t1", "ayu.beauty")];
        let sales = vec![
            overall_sale("s1", "a1", "2024-03-05", Some(100.0)),
            overall_sale("s2", "a1", "2024-04-05", Some(999.0)),
        ];
        let summary = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);
        assert_eq!(summary.account_stats.len(), 1);
        assert_eq!(summary.account_stats[0].revenue, 100.0);
    }

    #[test]
    fn daily_trend_has_one_point_per_day_with_leap_february() {
        let ctx = ReportContext {
            month: 1,
            year: 2024,
            talent_id: None,
            account_id: None,
        };
        let summary = build_summary(&ctx, &[], &[], &[], &[], &[]);
        assert_eq!(summary.daily_trend.len(), 29);
        assert!(summary.daily_trend.iter().all(|d| d.revenue == 0.0));
    }

    #[test]
    fn daily_trend_handles_december() {
        let ctx = ReportContext {
            month: 11,
            year: 2024,
            talent_id: None,
            account_id: None,
        };
        let summary = build_summary(&ctx, &[], &[], &[], &[], &[]);
        assert_eq!(summary.daily_trend.len(), 31);
    }

    #[test]
    fn march_scenario_totals_and_daily_points() {
        let talents = vec![talent("t1", "Ayu")];
        let accounts = vec![account("a1", "t1", "ayu.beauty")];
        let sales = vec![
            overall_sale("s1", "a1", "2024-03-05", Some(100_000.0)),
            overall_sale("s2", "a1", "2024-03-20", Some(50_000.0)),
        ];
        let summary = build_summary(&march_2024(), &talents, &accounts, &[], &[], &sales);

        assert_eq!(summary.total_revenue, 150_000.0);
        assert_eq!(summary.daily_trend.len(), 31);
        for point in &summary.daily_trend {
            let expected = match point.day {
                5 => 100_000.0,
                20 => 50_000.0,
                _ => 0.0,
            };
            assert_eq!(point.revenue, expected, "day {}", point.day);
        }
    }

    #[test]
    fn talent_activity_drops_idle_talents_and_sorts_by_count() {
        let talents = vec![talent("t1", "Ayu"), talent("t2", "Budi"), talent("t3", "Cici")];
        let accounts = vec![
            account("a1", "t1", "ayu.beauty"),
            account("a2", "t2", "budi.gadget"),
        ];
        let mk_post = |id: &str, talent_id: &str| post::Model {
            id: id.to_owned(),
            talent_id: talent_id.to_owned(),
            talent_name: String::new(),
            account_id: "a1".to_owned(),
            account_name: String::new(),
            product_id: "p1".to_owned(),
            product_name: String::new(),
            date: "2024-03-10".to_owned(),
            views: Some(0),
            likes: Some(0),
            comments: Some(0),
            link: None,
        };
        let posts = vec![
            mk_post("p1", "t2"),
            mk_post("p2", "t2"),
            mk_post("p3", "t1"),
        ];
        let summary = build_summary(&march_2024(), &talents, &accounts, &[], &posts, &[]);
        let names: Vec<&str> = summary
            .talent_activity
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Budi", "Ayu"]);
    }
}
