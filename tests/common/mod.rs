use catalog::configuration::{get_configuration, DatabaseSettings, Settings};
use catalog::{db, helpers, models};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub settings: Settings,
}

/// Boots the full application on a random port against a throwaway
/// database. Returns None (and the caller skips) when Postgres is not
/// reachable in the environment running the tests.
pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = catalog::startup::run(listener, connection_pool.clone(), configuration.clone())
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        settings: configuration,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

/// Inserts a verified account straight into the database and mints a
/// bearer token for it, bypassing the registration round-trip.
pub async fn seed_user(app: &TestApp, is_admin: bool) -> (models::User, String) {
    let password_hash = helpers::password::hash("integration-pass").unwrap();
    let email = format!("user-{}@example.com", uuid::Uuid::new_v4());

    let mut user = models::User::new("Integration User".to_string(), email, password_hash);
    user.is_admin = is_admin;
    user.is_verified = true;

    let user = db::user::insert(&app.db_pool, user)
        .await
        .expect("Failed to seed user");

    let token = helpers::jwt::generate_token(user.id, &app.settings.auth.jwt_secret, 1)
        .expect("Failed to mint token");

    (user, token)
}
