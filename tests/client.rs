use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubcap::{
    HubcapError,
    github::{
        action::{
            Action, CreateIssue, CreatePull, CreateTarget, MergeMethod,
        },
        client::GithubClient,
        config::RemoteConfig,
        traits::RepoOps,
        types::ListKind,
    },
};

fn test_client(server: &MockServer) -> GithubClient {
    let mut config = RemoteConfig::new(
        "octocat",
        "hello-world",
        "gh_test_token",
        "tester",
    )
    .unwrap();
    config.base_url = server.uri();

    GithubClient::new(config).unwrap()
}

fn issue_page(start: u64, count: u64) -> Vec<Value> {
    (start..start + count)
        .map(|n| {
            json!({
                "number": n,
                "title": format!("Issue {n}"),
                "state": "open",
                "labels": [],
            })
        })
        .collect()
}

#[tokio::test]
async fn list_open_follows_pagination_links() {
    let server = MockServer::start().await;
    let issues_path = "/repos/octocat/hello-world/issues";

    let next = |page: u32| {
        format!(
            "<{}{}?state=open&per_page=30&page={}>; rel=\"next\"",
            server.uri(),
            issues_path,
            page
        )
    };

    Mock::given(method("GET"))
        .and(path(issues_path))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(issue_page(31, 30))
                .insert_header("link", next(3).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(issues_path))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(issue_page(61, 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    // first request carries no page param
    Mock::given(method("GET"))
        .and(path(issues_path))
        .and(query_param("state", "open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(issue_page(1, 30))
                .insert_header("link", next(2).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = client.list_open(ListKind::Issues, None).await.unwrap();

    assert_eq!(items.len(), 90);
    assert_eq!(items[0].number, 1);
    assert_eq!(items[89].number, 90);

    // page order is preserved across the boundary
    assert_eq!(items[29].number, 30);
    assert_eq!(items[30].number, 31);
}

#[tokio::test]
async fn list_open_respects_caller_cap() {
    let server = MockServer::start().await;
    let issues_path = "/repos/octocat/hello-world/issues";

    Mock::given(method("GET"))
        .and(path(issues_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(issue_page(1, 30))
                .insert_header(
                    "link",
                    format!(
                        "<{}{}?page=2>; rel=\"next\"",
                        server.uri(),
                        issues_path
                    )
                    .as_str(),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = client
        .list_open(ListKind::Issues, Some(10))
        .await
        .unwrap();

    assert_eq!(items.len(), 10);
}

#[tokio::test]
async fn list_open_issues_filters_pull_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 1, "title": "Real issue", "state": "open"},
            {
                "number": 2,
                "title": "Actually a PR",
                "state": "open",
                "pull_request": {"url": "https://example.com/pulls/2"},
            },
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = client.list_open(ListKind::Issues, None).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].number, 1);
}

#[tokio::test]
async fn create_issue_returns_payload_with_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues"))
        .and(header("authorization", "Bearer gh_test_token"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 55,
            "title": "Add integration tests",
            "state": "open",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = client
        .execute(Action::Create(CreateTarget::Issue(CreateIssue {
            title: "Add integration tests".into(),
            ..Default::default()
        })))
        .await
        .unwrap();

    assert!(payload["number"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn create_pull_sends_exactly_four_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/pulls"))
        .and(body_json(json!({
            "title": "T",
            "body": "B",
            "head": "feat",
            "base": "main",
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "number": 101 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = client
        .execute(Action::Create(CreateTarget::Pull(CreatePull {
            title: "T".into(),
            body: "B".into(),
            head: "feat".into(),
            base: "main".into(),
        })))
        .await
        .unwrap();

    assert_eq!(payload["number"], 101);
}

#[tokio::test]
async fn merge_defaults_to_merge_method_in_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/octocat/hello-world/pulls/42/merge"))
        .and(body_json(json!({ "merge_method": "merge" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "merged": true,
            "message": "Pull Request successfully merged",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = client
        .execute(Action::Merge {
            number: 42,
            method: MergeMethod::default(),
        })
        .await
        .unwrap();

    assert_eq!(payload["merged"], true);
}

#[tokio::test]
async fn empty_comment_body_makes_no_http_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues/5/comments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .execute(Action::Comment {
            number: 5,
            body: "".into(),
        })
        .await;

    assert!(matches!(result, Err(HubcapError::InvalidRequest(_))));
}

#[tokio::test]
async fn dispatch_accepts_bodyless_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/repos/octocat/hello-world/actions/workflows/ci.yml/dispatches",
        ))
        .and(body_json(json!({ "ref": "main" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = client
        .execute(Action::Dispatch {
            workflow: "ci.yml".into(),
            git_ref: "main".into(),
            inputs: serde_json::Map::new(),
        })
        .await
        .unwrap();

    assert_eq!(payload, json!({ "status": 204 }));
}

#[tokio::test]
async fn rate_limited_403_is_classified_with_reset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/issues"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({
                    "message": "API rate limit exceeded",
                })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.list_open(ListKind::Issues, None).await;

    match result {
        Err(HubcapError::Rejected {
            status,
            rate_limited,
            reset_at,
            ..
        }) => {
            assert_eq!(status, 403);
            assert!(rate_limited);
            assert_eq!(reset_at.unwrap().timestamp(), 1700000000);
        }
        other => panic!("expected rate-limited rejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn plain_403_is_not_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/issues"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Resource not accessible by integration",
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.list_open(ListKind::Issues, None).await;

    match result {
        Err(HubcapError::Rejected {
            status,
            rate_limited,
            reset_at,
            ..
        }) => {
            assert_eq!(status, 403);
            assert!(!rate_limited);
            assert!(reset_at.is_none());
        }
        other => panic!("expected plain rejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_an_ordinary_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/octocat/hello-world/pulls/999/merge"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .execute(Action::Merge {
            number: 999,
            method: MergeMethod::Squash,
        })
        .await;

    match result {
        Err(HubcapError::Rejected {
            status,
            message,
            action,
            rate_limited,
            ..
        }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Not Found"));
            assert_eq!(action, "merge");
            assert!(!rate_limited);
        }
        other => panic!("expected rejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn list_comments_returns_comment_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/issues/7/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "body": "First comment"},
            {"id": 2, "body": "Second comment"},
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let comments = client.list_comments(7).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].body, "Second comment");
}

#[tokio::test]
async fn repo_info_returns_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "octocat/hello-world",
            "default_branch": "main",
            "open_issues_count": 3,
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let payload = client.repo_info().await.unwrap();

    assert_eq!(payload["default_branch"], "main");
}
