//! End-to-end API tests against PostgreSQL
//!
//! Each test gets a fresh migrated database from `sqlx::test`.
//! Run with: DATABASE_URL=postgres://... cargo test -p biztime-server -- --ignored

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use biztime_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

fn app(pool: &PgPool) -> Router {
    build_router(AppState::new(pool.clone()), &ServerConfig::default())
}

async fn call(pool: &PgPool, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(pool).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed_companies(pool: &PgPool) {
    sqlx::query(
        r#"
        INSERT INTO companies (code, name, description) VALUES
            ('apple', 'Apple', 'Maker of iOS devices'),
            ('ibm', 'IBM', 'Technology company')
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

async fn seed_invoices(pool: &PgPool) {
    seed_companies(pool).await;
    sqlx::query(
        r#"
        INSERT INTO invoices (comp_code, amt, paid, add_date, paid_date) VALUES
            ('apple', 100, false, '2024-01-01', NULL),
            ('apple', 200, false, '2024-02-01', NULL),
            ('apple', 300, true, '2024-03-01', '2024-03-15')
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

async fn seed_industries(pool: &PgPool) {
    sqlx::query("INSERT INTO industries (code, industry) VALUES ('tech', 'Technology'), ('fin', 'Finance')")
        .execute(pool)
        .await
        .unwrap();
}

// === Companies ===

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn list_companies(pool: PgPool) {
    seed_companies(&pool).await;

    let (status, body) = call(&pool, "GET", "/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"companies": [
            {"code": "apple", "name": "Apple", "description": "Maker of iOS devices"},
            {"code": "ibm", "name": "IBM", "description": "Technology company"}
        ]})
    );
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn get_company_and_missing_company(pool: PgPool) {
    seed_companies(&pool).await;

    let (status, body) = call(&pool, "GET", "/companies/apple", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["name"], "Apple");

    let (status, body) = call(&pool, "GET", "/companies/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn create_company_derives_code(pool: PgPool) {
    let (status, body) = call(&pool, "POST", "/companies", Some(json!({"name": "Google"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"company": {"code": "google", "name": "Google", "description": null}})
    );

    // Same derived code again is a conflict, not an overwrite
    let (status, body) = call(
        &pool,
        "POST",
        "/companies",
        Some(json!({"name": "GOOGLE", "description": "Imposter"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (_, body) = call(&pool, "GET", "/companies/google", None).await;
    assert_eq!(body["company"]["name"], "Google");
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn update_company(pool: PgPool) {
    seed_companies(&pool).await;

    let (status, body) = call(
        &pool,
        "PUT",
        "/companies/apple",
        Some(json!({"name": "Apple Inc.", "description": "Maker of iOS and macOS devices"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["company"],
        json!({"code": "apple", "name": "Apple Inc.", "description": "Maker of iOS and macOS devices"})
    );

    // Partial update keeps the other field
    let (status, body) = call(
        &pool,
        "PUT",
        "/companies/apple",
        Some(json!({"description": "Fruit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"]["name"], "Apple Inc.");
    assert_eq!(body["company"]["description"], "Fruit");

    let (_, body) = call(&pool, "GET", "/companies/apple", None).await;
    assert_eq!(body["company"]["description"], "Fruit");

    let (status, _) = call(
        &pool,
        "PUT",
        "/companies/nonexistent",
        Some(json!({"name": "New Name", "description": "New Description"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn delete_company_cascades_invoices(pool: PgPool) {
    seed_invoices(&pool).await;

    let (status, body) = call(&pool, "DELETE", "/companies/apple", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, _) = call(&pool, "GET", "/companies/apple", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&pool, "GET", "/invoices", None).await;
    assert_eq!(body, json!({"invoices": []}));

    let (status, _) = call(&pool, "DELETE", "/companies/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Invoices ===

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn list_and_get_invoices(pool: PgPool) {
    seed_invoices(&pool).await;

    let (status, body) = call(&pool, "GET", "/invoices", None).await;
    assert_eq!(status, StatusCode::OK);
    let invoices = body["invoices"].as_array().unwrap();
    assert_eq!(invoices.len(), 3);
    assert_eq!(invoices[2]["paid_date"], "2024-03-15");

    let (status, body) = call(&pool, "GET", "/invoices/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"invoice": {
            "id": 1, "comp_code": "apple", "amt": 100.0, "paid": false,
            "add_date": "2024-01-01", "paid_date": null
        }})
    );

    let (status, _) = call(&pool, "GET", "/invoices/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn create_invoice(pool: PgPool) {
    seed_companies(&pool).await;

    let (status, body) = call(
        &pool,
        "POST",
        "/invoices",
        Some(json!({"comp_code": "ibm", "amt": 400, "paid": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let invoice = &body["invoice"];
    assert!(invoice["id"].is_i64());
    assert_eq!(invoice["comp_code"], "ibm");
    assert_eq!(invoice["amt"], 400.0);
    assert_eq!(invoice["paid"], false);
    assert!(invoice["add_date"].is_string());
    assert!(invoice["paid_date"].is_null());
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn create_paid_invoice_stamps_paid_date(pool: PgPool) {
    seed_companies(&pool).await;

    let (status, body) = call(
        &pool,
        "POST",
        "/invoices",
        Some(json!({"comp_code": "ibm", "amt": 50, "paid": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let invoice = &body["invoice"];
    assert_eq!(invoice["paid"], true);
    assert!(invoice["paid_date"].is_string());
    assert_eq!(invoice["paid_date"], invoice["add_date"]);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn create_invoice_for_missing_company_is_404(pool: PgPool) {
    let (status, body) = call(
        &pool,
        "POST",
        "/invoices",
        Some(json!({"comp_code": "nobody", "amt": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "company 'nobody' not found");
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn update_invoice_amount_only(pool: PgPool) {
    seed_invoices(&pool).await;

    let (status, body) = call(&pool, "PUT", "/invoices/1", Some(json!({"amt": 500}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["invoice"],
        json!({
            "id": 1, "comp_code": "apple", "amt": 500.0, "paid": false,
            "add_date": "2024-01-01", "paid_date": null
        })
    );

    let (status, _) = call(&pool, "PUT", "/invoices/999", Some(json!({"amt": 500}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn update_invoice_paid_sets_and_clears_paid_date(pool: PgPool) {
    seed_invoices(&pool).await;

    let (status, body) = call(&pool, "PUT", "/invoices/2", Some(json!({"paid": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["paid"], true);
    assert!(body["invoice"]["paid_date"].is_string());

    // Already paid: existing paid_date is kept
    let (_, body) = call(&pool, "PUT", "/invoices/3", Some(json!({"paid": true}))).await;
    assert_eq!(body["invoice"]["paid_date"], "2024-03-15");

    let (_, body) = call(&pool, "PUT", "/invoices/3", Some(json!({"paid": false}))).await;
    assert_eq!(body["invoice"]["paid"], false);
    assert!(body["invoice"]["paid_date"].is_null());
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn delete_invoice(pool: PgPool) {
    seed_invoices(&pool).await;

    let (status, body) = call(&pool, "DELETE", "/invoices/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted"}));

    let (status, _) = call(&pool, "DELETE", "/invoices/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Industries ===

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn list_industries_with_empty_companies(pool: PgPool) {
    seed_industries(&pool).await;

    let (status, body) = call(&pool, "GET", "/industries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"industries": [
            {"code": "fin", "industry": "Finance", "companies": []},
            {"code": "tech", "industry": "Technology", "companies": []}
        ]})
    );
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn create_update_delete_industry(pool: PgPool) {
    let (status, body) = call(
        &pool,
        "POST",
        "/industries",
        Some(json!({"code": "health", "industry": "Healthcare"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"industry": {"code": "health", "industry": "Healthcare"}}));

    let (status, _) = call(
        &pool,
        "POST",
        "/industries",
        Some(json!({"code": "health", "industry": "Again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &pool,
        "PUT",
        "/industries/health",
        Some(json!({"industry": "Healthcare Services"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"industry": {"code": "health", "industry": "Healthcare Services"}})
    );

    let (status, _) = call(
        &pool,
        "PUT",
        "/industries/nonexistent",
        Some(json!({"industry": "Nonexistent Industry"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&pool, "DELETE", "/industries/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM industries WHERE code = 'health'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let (status, _) = call(&pool, "DELETE", "/industries/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn associate_industry_and_company(pool: PgPool) {
    seed_companies(&pool).await;
    seed_industries(&pool).await;

    let (status, body) = call(&pool, "POST", "/industries/tech/companies/apple", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"association": {"industry_code": "tech", "comp_code": "apple"}})
    );

    let (status, body) = call(&pool, "POST", "/industries/tech/companies/apple", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    call(&pool, "POST", "/industries/tech/companies/ibm", None).await;

    let (_, body) = call(&pool, "GET", "/industries", None).await;
    assert_eq!(body["industries"][1]["companies"], json!(["apple", "ibm"]));
    assert_eq!(body["industries"][0]["companies"], json!([]));
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn associate_missing_side_is_404_without_insert(pool: PgPool) {
    seed_companies(&pool).await;
    seed_industries(&pool).await;

    let (status, body) = call(&pool, "POST", "/industries/nonexistent/companies/apple", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "industry 'nonexistent' not found");

    let (status, body) = call(&pool, "POST", "/industries/tech/companies/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "company 'nonexistent' not found");

    let associations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM industry_companies")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(associations, 0);
}

#[sqlx::test(migrator = "biztime_server::MIGRATOR")]
#[ignore = "requires database"]
async fn deleting_company_or_industry_removes_associations(pool: PgPool) {
    seed_companies(&pool).await;
    seed_industries(&pool).await;

    call(&pool, "POST", "/industries/tech/companies/apple", None).await;
    call(&pool, "POST", "/industries/tech/companies/ibm", None).await;

    let (status, _) = call(&pool, "DELETE", "/companies/apple", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&pool, "GET", "/industries", None).await;
    assert_eq!(body["industries"][1]["code"], "tech");
    assert_eq!(body["industries"][1]["companies"], json!(["ibm"]));

    let (status, _) = call(&pool, "DELETE", "/industries/tech", None).await;
    assert_eq!(status, StatusCode::OK);

    let associations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM industry_companies")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(associations, 0);
}
