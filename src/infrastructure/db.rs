use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Ids are opaque strings assigned by the record store on creation.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS talents (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            niche TEXT NOT NULL,
            status TEXT NOT NULL,
            join_date TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // talent_name is a write-time snapshot, not a join. No foreign keys:
    // deleting a talent leaves its accounts in place.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            talent_id TEXT NOT NULL,
            talent_name TEXT NOT NULL,
            platform TEXT NOT NULL,
            username TEXT NOT NULL,
            followers INTEGER NOT NULL DEFAULT 0
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            link TEXT NOT NULL,
            account_id TEXT NOT NULL,
            account_name TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY,
            talent_id TEXT NOT NULL,
            talent_name TEXT NOT NULL,
            account_id TEXT NOT NULL,
            account_name TEXT NOT NULL,
            product_id TEXT NOT NULL,
            product_name TEXT NOT NULL,
            date TEXT NOT NULL,
            views INTEGER,
            likes INTEGER,
            comments INTEGER
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Migration: posts gained an optional content link. Adding the column
    // fails when it already exists, so the error is ignored.
    let _ = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "ALTER TABLE posts ADD COLUMN link TEXT".to_owned(),
        ))
        .await;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id TEXT PRIMARY KEY,
            type TEXT NOT NULL,
            date TEXT NOT NULL,
            talent_id TEXT NOT NULL,
            talent_name TEXT NOT NULL,
            account_id TEXT NOT NULL,
            account_name TEXT NOT NULL,
            product_id TEXT,
            product_name TEXT NOT NULL,
            revenue REAL,
            commission REAL,
            quantity INTEGER,
            views INTEGER,
            clicks INTEGER,
            status TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            reset_token TEXT,
            reset_token_expires TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
