use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::domain::{DomainError, RecordStore};
use crate::infrastructure::auth::hash_password;
use crate::infrastructure::SqlRecordStore;
use crate::models::{account, post, product, sale, talent, user};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    let store = SqlRecordStore::new(db.clone());

    // 1. Admin user
    let password_hash =
        hash_password("admin123").map_err(DomainError::Internal)?;
    let now = chrono::Utc::now().to_rfc3339();
    let admin = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set("admin@talenthub.local".to_owned()),
        password_hash: Set(password_hash),
        reset_token: Set(None),
        reset_token_expires: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    // Ignore a duplicate admin when re-seeding
    let _ = admin.insert(db).await;

    // 2. Talents
    let ayu_id = store
        .create(talent::Model {
            id: String::new(),
            name: "Ayu Lestari".to_owned(),
            niche: "Beauty".to_owned(),
            status: "Active".to_owned(),
            join_date: "2024-01-15".to_owned(),
        })
        .await?;
    let budi_id = store
        .create(talent::Model {
            id: String::new(),
            name: "Budi Santoso".to_owned(),
            niche: "Gadgets".to_owned(),
            status: "Active".to_owned(),
            join_date: "2024-02-01".to_owned(),
        })
        .await?;

    // 3. Accounts
    let ayu_tiktok = store
        .create(account::Model {
            id: String::new(),
            talent_id: ayu_id.clone(),
            talent_name: "Ayu Lestari".to_owned(),
            platform: "TikTok".to_owned(),
            username: "ayu.beauty".to_owned(),
            followers: 125_000,
        })
        .await?;
    let budi_shopee = store
        .create(account::Model {
            id: String::new(),
            talent_id: budi_id.clone(),
            talent_name: "Budi Santoso".to_owned(),
            platform: "Shopee Video".to_owned(),
            username: "budi.gadget".to_owned(),
            followers: 48_000,
        })
        .await?;

    // 4. Products
    let serum_id = store
        .create(product::Model {
            id: String::new(),
            name: "Glow Serum 30ml".to_owned(),
            link: "https://shope.ee/glow-serum".to_owned(),
            account_id: ayu_tiktok.clone(),
            account_name: "ayu.beauty".to_owned(),
        })
        .await?;
    store
        .create(product::Model {
            id: String::new(),
            name: "TWS Earbuds X2".to_owned(),
            link: "https://shope.ee/tws-x2".to_owned(),
            account_id: budi_shopee.clone(),
            account_name: "budi.gadget".to_owned(),
        })
        .await?;

    // 5. A few posts and sales for the current seed month
    store
        .create(post::Model {
            id: String::new(),
            talent_id: ayu_id.clone(),
            talent_name: "Ayu Lestari".to_owned(),
            account_id: ayu_tiktok.clone(),
            account_name: "ayu.beauty".to_owned(),
            product_id: serum_id.clone(),
            product_name: "Glow Serum 30ml".to_owned(),
            date: "2024-03-05".to_owned(),
            views: Some(0),
            likes: Some(0),
            comments: Some(0),
            link: None,
        })
        .await?;

    store
        .create(sale::Model {
            id: String::new(),
            r#type: sale::TYPE_OVERALL.to_owned(),
            date: "2024-03-05".to_owned(),
            talent_id: ayu_id.clone(),
            talent_name: "Ayu Lestari".to_owned(),
            account_id: ayu_tiktok.clone(),
            account_name: "ayu.beauty".to_owned(),
            product_id: None,
            product_name: sale::OVERALL_PRODUCT_NAME.to_owned(),
            revenue: Some(1_250_000.0),
            commission: Some(62_500.0),
            quantity: Some(0),
            views: Some(15_400),
            clicks: Some(820),
            status: "Completed".to_owned(),
        })
        .await?;

    store
        .create(sale::Model {
            id: String::new(),
            r#type: sale::TYPE_PRODUCT.to_owned(),
            date: "2024-03-07".to_owned(),
            talent_id: ayu_id,
            talent_name: "Ayu Lestari".to_owned(),
            account_id: ayu_tiktok,
            account_name: "ayu.beauty".to_owned(),
            product_id: Some(serum_id),
            product_name: "Glow Serum 30ml".to_owned(),
            revenue: Some(540_000.0),
            commission: Some(27_000.0),
            quantity: Some(12),
            views: None,
            clicks: None,
            status: "Completed".to_owned(),
        })
        .await?;

    Ok(())
}
