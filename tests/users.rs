mod common;

use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{init_app, seed_user, setup, TEST_PASSWORD};
use todoapp::models::Role;
use todoapp::repository::UserRepository;

async fn stored_hash(ctx: &common::TestContext, id: i64) -> String {
    UserRepository::new(&ctx.pool)
        .find_by_id(id)
        .await
        .expect("Failed to load user")
        .expect("User should exist")
        .hashed_password
}

#[test_log::test(actix_rt::test)]
async fn test_profile_omits_password_hash() {
    let ctx = setup().await;
    let app = init_app(&ctx).await;
    let user = seed_user(&ctx, "profile", Role::User).await;

    let req = test::TestRequest::get()
        .uri("/user/")
        .insert_header(user.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], user.user.id);
    assert_eq!(body["username"], "profile");
    assert_eq!(body["email"], "profile@example.com");
    assert_eq!(body["role"], "user");
    assert_eq!(body["is_active"], true);
    assert!(body.get("hashed_password").is_none());
}

#[test_log::test(actix_rt::test)]
async fn test_profile_requires_token() {
    let ctx = setup().await;
    let app = init_app(&ctx).await;

    let req = test::TestRequest::get().uri("/user/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[test_log::test(actix_rt::test)]
async fn test_wrong_current_password_leaves_hash_untouched() {
    let ctx = setup().await;
    let app = init_app(&ctx).await;
    let user = seed_user(&ctx, "careful", Role::User).await;
    let before = stored_hash(&ctx, user.user.id).await;

    let req = test::TestRequest::put()
        .uri("/user/password")
        .insert_header(user.bearer())
        .set_json(json!({"password": "not-my-password", "new_password": "fresh-secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    assert_eq!(stored_hash(&ctx, user.user.id).await, before);
}

#[test_log::test(actix_rt::test)]
async fn test_password_change_replaces_credentials() {
    let ctx = setup().await;
    let app = init_app(&ctx).await;
    let user = seed_user(&ctx, "rotator", Role::User).await;
    let before = stored_hash(&ctx, user.user.id).await;

    let req = test::TestRequest::put()
        .uri("/user/password")
        .insert_header(user.bearer())
        .set_json(json!({"password": TEST_PASSWORD, "new_password": "fresh-secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
    assert_ne!(stored_hash(&ctx, user.user.id).await, before);

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "rotator"), ("password", TEST_PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_form([("username", "rotator"), ("password", "fresh-secret")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[test_log::test(actix_rt::test)]
async fn test_short_new_password_is_rejected() {
    let ctx = setup().await;
    let app = init_app(&ctx).await;
    let user = seed_user(&ctx, "shorty", Role::User).await;
    let before = stored_hash(&ctx, user.user.id).await;

    let req = test::TestRequest::put()
        .uri("/user/password")
        .insert_header(user.bearer())
        .set_json(json!({"password": TEST_PASSWORD, "new_password": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["new_password"].is_array());
    assert_eq!(stored_hash(&ctx, user.user.id).await, before);
}
