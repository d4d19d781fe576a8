use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_app::books::{BookStore, BooksModule};
use shelf_kernel::{settings::Settings, ModuleRegistry};

struct TestApp {
    router: Router,
    store: Arc<BookStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(BookStore::default());
        let mut registry = ModuleRegistry::new();
        registry
            .register(Arc::new(BooksModule::new(Arc::clone(&store))))
            .unwrap();
        let router = shelf_http::build_router(&registry, &Settings::default());
        Self { router, store }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    async fn add(&self, body: Value) -> String {
        let (status, response) = self.send(Method::POST, "/api/books", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{response}");
        response["data"]["bookId"].as_str().unwrap().to_string()
    }

    async fn names(&self, query: &str) -> Vec<String> {
        let (status, response) = self
            .send(Method::GET, &format!("/api/books{}", query), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        response["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["name"].as_str().unwrap().to_string())
            .collect()
    }
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

#[tokio::test]
async fn add_book_returns_created_with_id() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::POST, "/api/books", Some(book("Dune", 412, 12, true)))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    assert!(body["data"]["bookId"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn add_book_without_name_fails() {
    let app = TestApp::new();
    let mut payload = book("ignored", 10, 0, false);
    payload.as_object_mut().unwrap().remove("name");

    let (status, body) = app.send(Method::POST, "/api/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Failed to add book. Please provide the book name"})
    );
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn add_book_with_read_page_over_page_count_fails() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::POST, "/api/books", Some(book("Dune", 80, 90, false)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage must not be greater than pageCount"
    );
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn malformed_body_is_fail_envelope() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/books",
            Some(json!({"name": "Dune", "pageCount": -3})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn get_book_returns_full_record() {
    let app = TestApp::new();
    let id = app.add(book("Dune", 412, 412, false)).await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/books/{}", id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let record = &body["data"]["book"];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["name"], "Dune");
    assert_eq!(record["year"], 2010);
    assert_eq!(record["author"], "John Doe");
    assert_eq!(record["summary"], "Lorem ipsum dolor sit amet");
    assert_eq!(record["publisher"], "Dicoding Indonesia");
    assert_eq!(record["pageCount"], 412);
    assert_eq!(record["readPage"], 412);
    assert_eq!(record["finished"], true);
    assert_eq!(record["reading"], false);
    assert_eq!(record["insertedAt"], record["updatedAt"]);
}

#[tokio::test]
async fn get_unknown_book_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/books/xxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "Book not found"}));
}

#[tokio::test]
async fn list_returns_summaries_in_insertion_order() {
    let app = TestApp::new();
    app.add(book("Zeta", 10, 0, false)).await;
    app.add(book("Alpha", 10, 0, false)).await;

    let (status, body) = app.send(Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["name"], "Zeta");
    assert_eq!(books[1]["name"], "Alpha");
    for summary in books {
        let mut keys: Vec<&str> = summary
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "name", "publisher"]);
    }
}

#[tokio::test]
async fn list_on_empty_shelf_succeeds() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "data": {"books": []}}));
}

#[tokio::test]
async fn list_filters_by_query() {
    let app = TestApp::new();
    app.add(book("Dicoding Academy", 100, 100, false)).await;
    app.add(book("Belajar dicoding", 100, 50, true)).await;
    app.add(book("Rust Atomics", 100, 10, true)).await;
    app.add(book("Finished Tale", 10, 10, false)).await;

    assert_eq!(
        app.names("?name=DICODING").await,
        vec!["Dicoding Academy", "Belajar dicoding"]
    );
    assert_eq!(
        app.names("?reading=1").await,
        vec!["Belajar dicoding", "Rust Atomics"]
    );
    assert_eq!(
        app.names("?reading=0").await,
        vec!["Dicoding Academy", "Finished Tale"]
    );
    assert_eq!(
        app.names("?finished=1").await,
        vec!["Dicoding Academy", "Finished Tale"]
    );
    assert_eq!(
        app.names("?reading=1&finished=0").await,
        vec!["Belajar dicoding", "Rust Atomics"]
    );
    assert_eq!(
        app.names("?name=dicoding&finished=1").await,
        vec!["Dicoding Academy"]
    );
    assert_eq!(app.names("?name=&reading=").await.len(), 4);
}

#[tokio::test]
async fn repeated_query_key_uses_last_value() {
    let app = TestApp::new();
    app.add(book("Idle", 10, 0, false)).await;
    app.add(book("Busy", 10, 0, true)).await;

    let (status, body) = app
        .send(Method::GET, "/api/books?reading=1&reading=0", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(app.names("?reading=1&reading=0").await, vec!["Idle"]);
    assert_eq!(app.names("?reading=0&reading=1&page=3").await, vec!["Busy"]);
}

#[tokio::test]
async fn descriptive_fields_round_trip_as_sent() {
    let app = TestApp::new();
    let mut payload = book("Dune", 10, 0, false);
    payload["year"] = json!("2010");
    payload["author"] = json!({"first": "Frank", "last": "Herbert"});
    payload["publisher"] = Value::Null;
    let id = app.add(payload).await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/books/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let record = &body["data"]["book"];
    assert_eq!(record["year"], "2010");
    assert_eq!(record["author"], json!({"first": "Frank", "last": "Herbert"}));
    assert!(record["publisher"].is_null());
}

#[tokio::test]
async fn update_book_replaces_fields() {
    let app = TestApp::new();
    let id = app.add(book("Dune", 100, 100, false)).await;
    let before = app.store.get(&id).unwrap();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/books/{}", id),
            Some(book("Dune Messiah", 256, 40, true)),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "message": "Book updated successfully"})
    );

    let after = app.store.get(&id).unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.inserted_at, before.inserted_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.name, "Dune Messiah");
    assert_eq!(after.page_count, 256);
    assert_eq!(after.read_page, 40);
    assert!(after.reading);
    assert!(!after.finished);
}

#[tokio::test]
async fn update_failures_leave_record_unchanged() {
    let app = TestApp::new();
    let id = app.add(book("Dune", 100, 10, false)).await;
    let before = app.store.get(&id).unwrap();
    let uri = format!("/api/books/{}", id);

    let mut nameless = book("", 100, 10, false);
    nameless.as_object_mut().unwrap().remove("name");
    let (status, body) = app.send(Method::PUT, &uri, Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Failed to update book. Please provide the book name"
    );

    let (status, body) = app
        .send(Method::PUT, &uri, Some(book("Dune", 10, 11, false)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Failed to update book. readPage must not be greater than pageCount"
    );

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/books/missing",
            Some(book("", 10, 11, false)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Failed to update book. Id not found"})
    );

    assert_eq!(app.store.get(&id).unwrap(), before);
}

#[tokio::test]
async fn delete_book_removes_it() {
    let app = TestApp::new();
    let id = app.add(book("Dune", 10, 0, false)).await;
    let keep = app.add(book("Emma", 10, 0, false)).await;
    let uri = format!("/api/books/{}", id);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "message": "Book deleted successfully"})
    );
    assert_eq!(app.store.len(), 1);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.store.get(&keep).is_ok());

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. Id not found");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn finished_filter_example() {
    let app = TestApp::new();
    let a = app.add(json!({"name": "A", "pageCount": 100, "readPage": 100})).await;
    let b = app.add(json!({"name": "B", "pageCount": 100, "readPage": 50})).await;

    assert!(app.store.get(&a).unwrap().finished);
    assert!(!app.store.get(&b).unwrap().finished);
    assert_eq!(app.names("?finished=1").await, vec!["A"]);
}

#[tokio::test]
async fn service_routes_are_mounted() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));

    let (status, _) = app.send(Method::GET, "/api/books/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, spec) = app.send(Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/api/books"]["post"].is_object());
    assert!(spec["paths"]["/api/books/{book_id}"]["delete"].is_object());
}
