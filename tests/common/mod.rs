#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use todoapp::auth::Authenticator;
use todoapp::db::{self, DbPool};
use todoapp::models::{NewUser, Role, User};
use todoapp::repository::{BookCatalog, UserRepository};
use todoapp::routes;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "Password123!";

/// Fresh in-memory database plus the shared services the app needs.
pub struct TestContext {
    pub pool: DbPool,
    pub authenticator: web::Data<Authenticator>,
    pub catalog: web::Data<BookCatalog>,
}

/// A seeded account and a bearer token for it.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn setup() -> TestContext {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    TestContext {
        pool,
        // Minimum bcrypt cost keeps the suite fast.
        authenticator: web::Data::new(Authenticator::new(TEST_SECRET, Duration::minutes(20), 4)),
        catalog: web::Data::new(BookCatalog::seeded()),
    }
}

pub async fn init_app(
    ctx: &TestContext,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(ctx.authenticator.clone())
            .app_data(ctx.catalog.clone())
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

pub async fn seed_user(ctx: &TestContext, username: &str, role: Role) -> TestUser {
    let user = UserRepository::new(&ctx.pool)
        .create(&NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            hashed_password: ctx
                .authenticator
                .hash_password(TEST_PASSWORD)
                .expect("Failed to hash password"),
            role,
        })
        .await
        .expect("Failed to seed user");
    let token = ctx
        .authenticator
        .issue_token(&user)
        .expect("Failed to issue token");
    TestUser { user, token }
}

pub fn todo_payload(title: &str, description: &str, priority: i32, complete: bool) -> Value {
    json!({
        "title": title,
        "description": description,
        "priority": priority,
        "complete": complete
    })
}

pub async fn todo_count(pool: &DbPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
        .fetch_one(pool)
        .await
        .expect("Failed to count todos");
    count
}
