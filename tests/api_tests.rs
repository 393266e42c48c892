mod common;

use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Registration & Auth ─────────────────────────────────────────

#[tokio::test]
async fn register_returns_tokens() {
    let app = common::spawn_app().await;

    let (body, status) = app.register("alice@test.com", "password123", "Alice").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = common::spawn_app().await;
    app.signup("alice@test.com").await;

    let (_, status) = app.register("alice@test.com", "password123", "Alice").await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = common::spawn_app().await;

    let (_, status) = app.register("alice@test.com", "short", "Alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_invalid_credentials() {
    let app = common::spawn_app().await;
    app.signup("alice@test.com").await;

    let (_, status) = app.login("alice@test.com", "wrongpassword").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn refresh_token_reuse_detection() {
    let app = common::spawn_app().await;
    app.signup("alice@test.com").await;
    let (login_body, _) = app.login("alice@test.com", "password123").await;
    let refresh = login_body["refresh_token"].as_str().unwrap();

    let resp1 = app
        .client
        .post(app.url("/api/v1/auth/refresh"))
        .header("cookie", format!("refresh_token={refresh}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp1.status(), StatusCode::OK);

    // Replaying the same token revokes all sessions
    let resp2 = app
        .client
        .post(app.url("/api/v1/auth/refresh"))
        .header("cookie", format!("refresh_token={refresh}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp2.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Company provisioning ────────────────────────────────────────

#[tokio::test]
async fn provision_derives_slug_and_redirect() {
    let app = common::spawn_app().await;
    let token = app.signup("founder@test.com").await;

    let outcome = app.create_company(&token, "Acme Corp!").await;
    assert_eq!(outcome["company"]["slug"], "acme-corp");
    assert_eq!(outcome["membership"]["role"], "owner");
    assert_eq!(outcome["membership"]["status"], "active");
    assert_eq!(outcome["redirect_to"], "/app/acme-corp/dashboard");

    common::cleanup(app).await;
}

#[tokio::test]
async fn provision_creates_default_folders() {
    let app = common::spawn_app().await;
    let token = app.signup("founder@test.com").await;

    let outcome = app.create_company(&token, "Acme Corp").await;
    let company_id = outcome["company"]["id"].as_str().unwrap();

    let (folders, status) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/folders"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = folders
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Finance", "General", "HR"]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn provision_sets_active_company_snapshot() {
    let app = common::spawn_app().await;
    let token = app.signup("founder@test.com").await;

    let outcome = app.create_company(&token, "Acme Corp").await;

    let (snapshot, status) = app.get_auth("/api/v1/session/company", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["company_id"], outcome["company"]["id"]);
    assert_eq!(snapshot["slug"], "acme-corp");
    assert_eq!(snapshot["role"], "owner");

    common::cleanup(app).await;
}

#[tokio::test]
async fn provision_retries_taken_slug_with_suffix() {
    let app = common::spawn_app().await;
    let token_a = app.signup("a@test.com").await;
    let token_b = app.signup("b@test.com").await;

    let first = app.create_company(&token_a, "Acme Corp").await;
    assert_eq!(first["company"]["slug"], "acme-corp");

    let second = app.create_company(&token_b, "Acme Corp").await;
    let slug = second["company"]["slug"].as_str().unwrap();
    assert!(slug.starts_with("acme-corp-"), "expected suffixed slug, got {slug}");
    assert_ne!(slug, "acme-corp");

    common::cleanup(app).await;
}

#[tokio::test]
async fn provision_requires_auth_and_writes_nothing() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/v1/companies"))
        .json(&json!({ "name": "Ghost Inc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM companies")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn provision_survives_folder_creation_failure() {
    let app = common::spawn_app().await;
    let token = app.signup("founder@test.com").await;

    // Make every folder insert fail
    sqlx::query("DROP TABLE folders CASCADE")
        .execute(&app.pool)
        .await
        .unwrap();

    let (outcome, status) = app
        .post_auth("/api/v1/companies", &token, &json!({ "name": "Acme Corp" }))
        .await;
    assert_eq!(status, StatusCode::OK, "provisioning failed: {outcome}");
    assert_eq!(outcome["redirect_to"], "/app/acme-corp/dashboard");

    common::cleanup(app).await;
}

// ── Tenant isolation ────────────────────────────────────────────

#[tokio::test]
async fn members_cannot_read_other_tenants() {
    let app = common::spawn_app().await;
    let token_a = app.signup("a@test.com").await;
    let token_b = app.signup("b@test.com").await;

    let company_a = app.create_company(&token_a, "Alpha").await;
    app.create_company(&token_b, "Beta").await;
    let company_a_id = company_a["company"]["id"].as_str().unwrap();

    let (_, status) = app
        .get_auth(&format!("/api/v1/companies/{company_a_id}/tasks"), &token_b)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn create_task_overrides_caller_supplied_company_id() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;

    let company_a = app.create_company(&token, "Alpha").await;
    let company_b = app.create_company(&token, "Beta").await;
    let a_id = company_a["company"]["id"].as_str().unwrap();
    let b_id = company_b["company"]["id"].as_str().unwrap();

    // Body smuggles a foreign company id; the path scope wins.
    let (task, status) = app
        .post_auth(
            &format!("/api/v1/companies/{a_id}/tasks"),
            &token,
            &json!({ "title": "Quarterly report", "company_id": b_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["company_id"].as_str().unwrap(), a_id);

    let persisted: String =
        sqlx::query_scalar("SELECT company_id::text FROM tasks WHERE title = 'Quarterly report'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(persisted, a_id);

    common::cleanup(app).await;
}

// ── Tasks ───────────────────────────────────────────────────────

#[tokio::test]
async fn list_tasks_filters_and_orders_newest_first() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();
    let base = format!("/api/v1/companies/{company_id}/tasks");

    app.post_auth(&base, &token, &json!({ "title": "First", "status": "todo" }))
        .await;
    app.post_auth(&base, &token, &json!({ "title": "Second", "status": "done" }))
        .await;
    app.post_auth(&base, &token, &json!({ "title": "Third", "status": "todo" }))
        .await;

    let (all, status) = app.get_auth(&base, &token).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    let (todo, _) = app.get_auth(&format!("{base}?status=todo"), &token).await;
    let todo_titles: Vec<&str> = todo
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(todo_titles, vec!["Third", "First"]);

    common::cleanup(app).await;
}

#[tokio::test]
async fn list_tasks_on_empty_table_is_empty_list() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let (body, status) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/tasks"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    common::cleanup(app).await;
}

// ── Documents ───────────────────────────────────────────────────

#[tokio::test]
async fn upload_then_download_document() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"hello world".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );

    let resp = app
        .client
        .post(app.url(&format!("/api/v1/companies/{company_id}/documents")))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(doc["name"], "notes.txt");
    assert_eq!(doc["size_bytes"], 11);
    let storage_path = doc["storage_path"].as_str().unwrap();
    assert!(storage_path.starts_with(company_id), "key not tenant-namespaced: {storage_path}");
    assert!(storage_path.ends_with(".txt"));

    let doc_id = doc["id"].as_str().unwrap();
    let download = app
        .client
        .get(app.url(&format!(
            "/api/v1/companies/{company_id}/documents/{doc_id}/download"
        )))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.bytes().await.unwrap().as_ref(), b"hello world");

    common::cleanup(app).await;
}

#[tokio::test]
async fn documents_list_newest_first() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    for name in ["one.txt", "two.txt"] {
        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(b"x".to_vec())
                .file_name(name)
                .mime_str("text/plain")
                .unwrap(),
        );
        let resp = app
            .client
            .post(app.url(&format!("/api/v1/companies/{company_id}/documents")))
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (docs, _) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/documents"), &token)
        .await;
    let names: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["two.txt", "one.txt"]);

    common::cleanup(app).await;
}

// ── Members & invitations ───────────────────────────────────────

#[tokio::test]
async fn invite_existing_user_creates_pending_membership() {
    let app = common::spawn_app().await;
    let owner = app.signup("owner@test.com").await;
    let invitee = app.signup("invitee@test.com").await;
    let company = app.create_company(&owner, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/members"),
            &owner,
            &json!({ "email": "invitee@test.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "member_pending");
    assert_eq!(body["member"]["role"], "member");
    assert_eq!(body["member"]["status"], "pending");

    // Pending members are not listed and have no access yet
    let (members, _) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/members"), &owner)
        .await;
    assert_eq!(members.as_array().unwrap().len(), 1);

    let (_, status) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/tasks"), &invitee)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Accepting flips the membership active and grants access
    let (_, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/members/accept"),
            &invitee,
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/tasks"), &invitee)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn invite_unknown_email_creates_tokened_invitation() {
    let app = common::spawn_app().await;
    let owner = app.signup("owner@test.com").await;
    let company = app.create_company(&owner, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/members"),
            &owner,
            &json!({ "email": "new@test.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "invited");
    assert_eq!(body["invitation"]["email"], "new@test.com");

    // Token is opaque and not serialized in the response
    assert!(body["invitation"]["token"].is_null());

    let (token_value, expires_at): (String, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "SELECT token, expires_at FROM company_invitations WHERE email = 'new@test.com'",
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(token_value.len(), 64);

    let days = (expires_at - chrono::Utc::now()).num_days();
    assert!((6..=7).contains(&days), "expected ~7 day expiry, got {days}");

    // Registering with the token joins the company directly
    let resp = app
        .client
        .post(app.url("/api/v1/auth/register"))
        .json(&json!({
            "email": "new@test.com",
            "password": "password123",
            "name": "New User",
            "invite_token": token_value,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let new_token: serde_json::Value = resp.json().await.unwrap();
    let new_token = new_token["access_token"].as_str().unwrap();

    let (members, _) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/members"), &owner)
        .await;
    assert_eq!(members.as_array().unwrap().len(), 2);

    let (_, status) = app
        .get_auth(&format!("/api/v1/companies/{company_id}/tasks"), new_token)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn invite_requires_owner_role() {
    let app = common::spawn_app().await;
    let owner = app.signup("owner@test.com").await;
    let member = app.signup("member@test.com").await;
    let company = app.create_company(&owner, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    app.post_auth(
        &format!("/api/v1/companies/{company_id}/members"),
        &owner,
        &json!({ "email": "member@test.com" }),
    )
    .await;
    app.post_auth(
        &format!("/api/v1/companies/{company_id}/members/accept"),
        &member,
        &json!({}),
    )
    .await;

    let (_, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/members"),
            &member,
            &json!({ "email": "other@test.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    common::cleanup(app).await;
}

// ── Scheduling ──────────────────────────────────────────────────

#[tokio::test]
async fn booking_combines_date_and_time_fields() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let (booking, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/bookings"),
            &token,
            &json!({
                "room_name": "Boardroom",
                "title": "Standup",
                "date": "2026-09-01",
                "start_time": "09:00",
                "end_time": "09:30",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {booking}");
    assert_eq!(booking["starts_at"], "2026-09-01T09:00:00Z");
    assert_eq!(booking["ends_at"], "2026-09-01T09:30:00Z");

    common::cleanup(app).await;
}

#[tokio::test]
async fn overlapping_bookings_both_succeed() {
    // Pins current behavior: no overlap detection exists.
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();
    let path = format!("/api/v1/companies/{company_id}/bookings");

    let booking = json!({
        "room_name": "Boardroom",
        "title": "Standup",
        "date": "2026-09-01",
        "start_time": "09:00",
        "end_time": "10:00",
    });

    let (first, second) = tokio::join!(
        app.post_auth(&path, &token, &booking),
        app.post_auth(&path, &token, &booking),
    );
    assert_eq!(first.1, StatusCode::OK);
    assert_eq!(second.1, StatusCode::OK);

    let (all, _) = app.get_auth(&path, &token).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    common::cleanup(app).await;
}

#[tokio::test]
async fn booking_rejects_malformed_time() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;
    let company = app.create_company(&token, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    let (_, status) = app
        .post_auth(
            &format!("/api/v1/companies/{company_id}/bookings"),
            &token,
            &json!({
                "room_name": "Boardroom",
                "title": "Standup",
                "date": "2026-09-01",
                "start_time": "9am",
                "end_time": "10:00",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn availability_lookup_orders_by_member_name() {
    let app = common::spawn_app().await;
    let owner = app.signup("owner@test.com").await;
    let company = app.create_company(&owner, "Alpha").await;
    let company_id = company["company"]["id"].as_str().unwrap();

    // Second member with a name sorting before the owner's
    let (body, _) = app
        .register("zed@test.com", "password123", "Aaron")
        .await;
    let aaron = body["access_token"].as_str().unwrap().to_string();
    app.post_auth(
        &format!("/api/v1/companies/{company_id}/members"),
        &owner,
        &json!({ "email": "zed@test.com" }),
    )
    .await;
    app.post_auth(
        &format!("/api/v1/companies/{company_id}/members/accept"),
        &aaron,
        &json!({}),
    )
    .await;

    let path = format!("/api/v1/companies/{company_id}/availability");
    let slot = |t0: &str, t1: &str| {
        json!({ "date": "2026-09-01", "start_time": t0, "end_time": t1 })
    };
    app.post_auth(&path, &owner, &slot("09:00", "12:00")).await;
    app.post_auth(&path, &aaron, &slot("10:00", "11:00")).await;

    let (entries, status) = app
        .get_auth(
            &format!("{path}?date=2026-09-01&start_time=08:00&end_time=17:00"),
            &owner,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Aaron", "Test User"]);

    common::cleanup(app).await;
}

// ── Session context ─────────────────────────────────────────────

#[tokio::test]
async fn switch_company_refreshes_snapshot() {
    let app = common::spawn_app().await;
    let token = app.signup("a@test.com").await;

    let alpha = app.create_company(&token, "Alpha").await;
    let beta = app.create_company(&token, "Beta").await;

    // Provisioning Beta moved the snapshot there
    let (snapshot, _) = app.get_auth("/api/v1/session/company", &token).await;
    assert_eq!(snapshot["company_id"], beta["company"]["id"]);

    let (snapshot, status) = app
        .put_auth(
            "/api/v1/session/company",
            &token,
            &json!({ "company_id": alpha["company"]["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["company_id"], alpha["company"]["id"]);
    assert_eq!(snapshot["slug"], "alpha");

    common::cleanup(app).await;
}

#[tokio::test]
async fn switch_company_rejects_non_members() {
    let app = common::spawn_app().await;
    let token_a = app.signup("a@test.com").await;
    let token_b = app.signup("b@test.com").await;
    let alpha = app.create_company(&token_a, "Alpha").await;

    let (_, status) = app
        .put_auth(
            "/api/v1/session/company",
            &token_b,
            &json!({ "company_id": alpha["company"]["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}
