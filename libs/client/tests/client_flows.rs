//! Client flows against a mock API server

use client::{
    WorkitClient,
    config::ClientConfig,
    dto::{ActivityType, CreatePostRequest, UpdateGroupRequest, UpdatePostRequest},
    error::ClientError,
    view_models::{ImageUpload, UiState},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

const CREATED_AT: &str = "2025-03-01T12:00:00Z";

fn token_for(user_id: Uuid) -> String {
    encode(
        &Header::default(),
        &json!({"id": user_id, "iat": 1_700_000_000u64, "exp": 4_000_000_000u64}),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .unwrap()
}

fn group_json(id: Uuid, name: &str, members: &[Uuid]) -> Value {
    json!({
        "id": id,
        "name": name,
        "imageUrl": null,
        "description": null,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
        "users": members.iter().map(|m| json!({"id": m, "name": "Member"})).collect::<Vec<_>>(),
    })
}

fn post_json(id: Uuid, author: Uuid, group_id: Uuid) -> Value {
    json!({
        "id": id,
        "title": "Corrida matinal",
        "activityType": "RUNNING",
        "body": null,
        "imageUrl": null,
        "location": "Parque",
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
        "user": {"id": author, "name": "Author"},
        "group": group_json(group_id, "Corredores", &[author]),
    })
}

fn user_json(id: Uuid, avatar_url: Option<&str>, groups: &[Uuid]) -> Value {
    json!({
        "id": id,
        "email": "ana@example.com",
        "name": "Ana",
        "avatarUrl": avatar_url,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
        "groups": groups.iter().map(|g| json!({"id": g, "name": "Grupo"})).collect::<Vec<_>>(),
    })
}

async fn connect(server: &MockServer) -> (WorkitClient, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let client = WorkitClient::connect(ClientConfig::new(
        server.uri(),
        dir.path().join("auth.json"),
    ))
    .await
    .unwrap();
    (client, dir)
}

async fn logged_in(server: &MockServer, user_id: Uuid) -> (WorkitClient, TempDir) {
    let (client, dir) = connect(server).await;
    client.store.save_token(&token_for(user_id)).await.unwrap();
    (client, dir)
}

#[tokio::test]
async fn test_login_persists_token_and_authorizes_later_calls() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);
    let (joined, deleted) = (Uuid::new_v4(), Uuid::new_v4());

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({"email": "ana@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json(user_id, None, &[joined, deleted])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}", joined).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(joined, "Corredores", &[user_id])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}", deleted).as_str()))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Group not found", "statusCode": 404})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _dir) = connect(&server).await;
    let login = client.login_view_model();

    assert_eq!(
        login.login("ana@example.com", "minhasenha123").await,
        UiState::Success(())
    );
    assert_eq!(client.store.get_user_id(), Some(user_id));

    let login_request = &server.received_requests().await.unwrap()[0];
    assert!(login_request.headers.get("authorization").is_none());

    let groups = client.groups.my_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Corredores");
}

#[tokio::test]
async fn test_failed_login_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": "Invalid credentials", "statusCode": 401})),
        )
        .mount(&server)
        .await;

    let (client, _dir) = connect(&server).await;
    let login = client.login_view_model();

    let state = login.login("ana@example.com", "wrong-password").await;
    assert_eq!(state.error(), Some("Invalid credentials"));
    assert!(!client.store.is_logged_in());

    assert_eq!(
        login.login("   ", "x").await.error(),
        Some("Email and password are required")
    );
}

#[tokio::test]
async fn test_register_validates_before_calling_api() {
    let server = MockServer::start().await;
    let (client, _dir) = connect(&server).await;
    let register = client.register_view_model();

    let state = register
        .register("Ana", "ana@example.com", "minhasenha123", "different")
        .await;
    assert_eq!(state.error(), Some("Passwords do not match"));

    let state = register.register("Ana", "ana@example.com", "short", "short").await;
    assert_eq!(
        state.error(),
        Some("Password must be at least 8 characters long")
    );

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(json!({"name": "Ana", "email": "ana@example.com"})))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"error": "Email already registered", "statusCode": 409})),
        )
        .mount(&server)
        .await;

    let (client, _dir) = connect(&server).await;
    let err = client
        .auth
        .register("Ana", "ana@example.com", "minhasenha123")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Http {
            status: 409,
            message: "Email already registered".to_string()
        }
    );
}

#[tokio::test]
async fn test_session_calls_require_login() {
    let server = MockServer::start().await;
    let (client, _dir) = connect(&server).await;

    assert_eq!(
        client.groups.my_groups().await.unwrap_err(),
        ClientError::Unauthenticated
    );

    let groups = client.groups_view_model();
    assert_eq!(
        groups.load_explore_groups().await.error(),
        Some("User not authenticated")
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/search/corrida%20de%20rua"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, Uuid::new_v4()).await;
    let groups = client.groups_view_model();

    assert_eq!(
        groups.search_groups(" corrida de rua ").await,
        UiState::Success(vec![])
    );
}

#[tokio::test]
async fn test_create_group_uploads_image_first() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let image_url = format!("{}/storage/files/cover.png", server.uri());

    Mock::given(method("POST"))
        .and(path("/storage/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "File uploaded successfully",
            "url": image_url,
            "key": "cover.png",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups"))
        .and(body_partial_json(json!({"name": "Corredores", "imageUrl": image_url})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(group_json(group_id, "Corredores", &[user_id])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json(user_id, None, &[group_id])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}", group_id).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(group_id, "Corredores", &[user_id])),
        )
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let groups = client.groups_view_model();

    let state = groups
        .create_group(
            "Corredores",
            Some("   ".to_string()),
            Some(ImageUpload {
                bytes: vec![0x89, b'P', b'N', b'G'],
                filename: "cover.png".to_string(),
                content_type: "image/png".to_string(),
            }),
        )
        .await;

    assert_eq!(state.success().map(|g| g.id), Some(group_id));
    assert_eq!(
        groups.my_groups_state.state().success().map(|g| g.len()),
        Some(1)
    );

    let requests = server.received_requests().await.unwrap();
    let upload = requests.iter().find(|r| r.url.path() == "/storage/upload").unwrap();
    let content_type = upload.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_join_and_leave_use_current_user() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let membership_path = format!("/groups/{}/users/{}", group_id, user_id);

    Mock::given(method("POST"))
        .and(path(membership_path.as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "userId": user_id,
            "groupId": group_id,
            "createdAt": CREATED_AT,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(membership_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id, None, &[])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let groups = client.groups_view_model();

    let joined = groups.join_group(group_id).await;
    assert_eq!(joined.success().map(|m| m.user_id), Some(user_id));
    assert_eq!(groups.leave_group(group_id).await, UiState::Success(()));
}

#[tokio::test]
async fn test_post_owner_checks() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let someone_else = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let own_post = Uuid::new_v4();
    let other_post = Uuid::new_v4();

    for (post_id, author) in [(own_post, user_id), (other_post, someone_else)] {
        Mock::given(method("GET"))
            .and(path(format!("/posts/{}", post_id).as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(post_json(post_id, author, group_id)),
            )
            .mount(&server)
            .await;
    }
    Mock::given(method("PUT"))
        .and(path(format!("/posts/{}", own_post).as_str()))
        .and(body_partial_json(json!({"body": "5km"})))
        .respond_with(ResponseTemplate::new(200).set_body_json({
            let mut post = post_json(own_post, user_id, group_id);
            post["body"] = json!("5km");
            post
        }))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let posts = client.post_view_model();

    let detail = posts.load_post(other_post).await;
    assert_eq!(detail.success().map(|d| d.is_owner), Some(false));

    let state = posts.delete_post(other_post).await;
    assert_eq!(state.error(), Some("Only the author can change this post"));

    let detail = posts.load_post(own_post).await;
    assert_eq!(detail.success().map(|d| d.is_owner), Some(true));

    let state = posts
        .update_post(
            own_post,
            UpdatePostRequest {
                body: Some(Some("5km".to_string())),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(
        state.success().and_then(|p| p.body.clone()),
        Some("5km".to_string())
    );
    assert_eq!(
        posts
            .post_state
            .state()
            .success()
            .and_then(|d| d.post.body.clone()),
        Some("5km".to_string())
    );
}

#[tokio::test]
async fn test_create_post_and_feed() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_partial_json(json!({
            "title": "Corrida matinal",
            "activityType": "RUNNING",
            "groupId": group_id,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(post_id, user_id, group_id)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/posts/group/{}", group_id).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(post_id, user_id, group_id)])),
        )
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;

    let created = client
        .post_view_model()
        .create_post(
            CreatePostRequest {
                title: "Corrida matinal".to_string(),
                activity_type: ActivityType::Running,
                body: None,
                image_url: None,
                location: Some("Parque".to_string()),
                group_id,
            },
            None,
        )
        .await;
    assert_eq!(created.success().map(|p| p.group.id), Some(group_id));

    let feed = client.feed_view_model();
    assert!(feed.feed_state.state().is_loading());
    let state = feed.load_group_feed(group_id).await;
    assert_eq!(state.success().map(|posts| posts[0].id), Some(post_id));
}

#[tokio::test]
async fn test_profile_avatar_and_logout() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let avatar = "http://files.test/storage/files/me.webp";

    Mock::given(method("POST"))
        .and(path("/storage/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "File uploaded successfully",
            "url": avatar,
            "key": "me.webp",
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .and(body_partial_json(json!({"avatarUrl": avatar})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id, Some(avatar), &[])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let profile = client.profile_view_model();

    let state = profile
        .update_avatar(ImageUpload {
            bytes: b"RIFF0000WEBP".to_vec(),
            filename: "me.webp".to_string(),
            content_type: "image/webp".to_string(),
        })
        .await;
    assert_eq!(
        state.success().and_then(|u| u.avatar_url.clone()),
        Some(avatar.to_string())
    );
    assert_eq!(
        profile.profile_state.state().success().map(|u| u.id),
        Some(user_id)
    );

    assert_eq!(profile.logout().await, UiState::Success(()));
    assert!(!client.store.is_logged_in());
    assert_eq!(
        profile.load_profile().await.error(),
        Some("User not authenticated")
    );
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, Uuid::new_v4()).await;
    assert!(matches!(
        client.posts.get_posts().await,
        Err(ClientError::Decode(_))
    ));
}

#[tokio::test]
async fn test_remove_avatar_sends_null() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .and(body_json(json!({"avatarUrl": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id, None, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let profile = client.profile_view_model();

    let state = profile.remove_avatar().await;
    assert_eq!(state.success().map(|u| u.avatar_url.clone()), Some(None));
    assert_eq!(
        profile.profile_state.state().success().map(|u| u.id),
        Some(user_id)
    );
}

#[tokio::test]
async fn test_download_and_delete_file() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G'];

    Mock::given(method("GET"))
        .and(path("/storage/files/cover.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(png.clone()),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/storage/files/cover.png"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/files/gone.png"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "File not found", "statusCode": 404})),
        )
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, Uuid::new_v4()).await;

    let file = client.storage.download("cover.png").await.unwrap();
    assert_eq!(file.bytes, png);
    assert_eq!(file.content_type, "image/png");

    client.storage.delete_file("cover.png").await.unwrap();

    let err = client.storage.download("gone.png").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "File not found");
}

#[tokio::test]
async fn test_delete_account_ends_session() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json(user_id, None, &[])])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/users/{}", user_id).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;

    let users = client.users.get_users().await.unwrap();
    assert_eq!(users[0].id, user_id);

    let profile = client.profile_view_model();
    assert_eq!(profile.delete_account().await, UiState::Success(()));
    assert!(!client.store.is_logged_in());
}

#[tokio::test]
async fn test_corrupt_session_file_still_connects() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token_for(user_id)})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("auth.json");
    tokio::fs::write(&token_path, br#"{"token": "abc""#).await.unwrap();

    let client = WorkitClient::connect(ClientConfig::new(server.uri(), &token_path))
        .await
        .unwrap();
    assert!(!client.store.is_logged_in());

    client.auth.login("ana@example.com", "minhasenha123").await.unwrap();
    assert_eq!(client.store.get_user_id(), Some(user_id));
}

#[tokio::test]
async fn test_update_and_delete_group() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();
    let group_path = format!("/groups/{}", group_id);

    Mock::given(method("PUT"))
        .and(path(group_path.as_str()))
        .and(body_json(json!({"name": "Remo", "description": null})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(group_id, "Remo", &[user_id])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(group_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _dir) = logged_in(&server, user_id).await;
    let changes = UpdateGroupRequest {
        name: Some("Remo".to_string()),
        description: Some(None),
        ..Default::default()
    };

    let group = client.groups.update_group(group_id, &changes).await.unwrap();
    assert_eq!(group.name, "Remo");
    assert_eq!(group.description, None);

    client.groups.delete_group(group_id).await.unwrap();
}
