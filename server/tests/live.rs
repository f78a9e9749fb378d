//! Full list and item lifecycle against a live server.
//!
//! # Design
//! Starts the server on a random port, then drives the JSON API over real
//! HTTP with ureq. Covers what the in-process router tests cannot: socket
//! binding, content negotiation with a real client, and state surviving
//! across connections.

use serde_json::{json, Value};
use todo_core::{ItemRules, TodoService};

enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Send one JSON request and return `(status, body)`.
///
/// Status codes are returned as data rather than `Err` so 4xx responses can
/// be asserted on.
fn execute(method: Method, url: &str, body: Option<Value>) -> (u16, Value) {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (method, body) {
        (Method::Get, _) => agent.get(url).header("Accept", "application/json").call(),
        (Method::Delete, _) => agent.delete(url).header("Accept", "application/json").call(),
        (Method::Post, body) => agent
            .post(url)
            .header("Accept", "application/json")
            .content_type("application/json")
            .send(body.unwrap_or(Value::Null).to_string().as_bytes()),
        (Method::Put, body) => agent
            .put(url)
            .header("Accept", "application/json")
            .content_type("application/json")
            .send(body.unwrap_or(Value::Null).to_string().as_bytes()),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string().unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, body)
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, TodoService::in_memory(ItemRules::default())).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[test]
fn crud_lifecycle() {
    let base = start_server();
    let lists = format!("{base}/todolists");

    // Empty store.
    let (status, body) = execute(Method::Get, &lists, None);
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    // Create a list.
    let (status, body) = execute(Method::Post, &lists, Some(json!({"name": "Errands"})));
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": 1, "name": "Errands"}));
    let list = format!("{lists}/1");

    // Duplicate name is rejected.
    let (status, body) = execute(Method::Post, &lists, Some(json!({"name": "Errands"})));
    assert_eq!(status, 422);
    assert_eq!(body["message"], "Name has already been taken");

    // Rename.
    let (status, body) = execute(Method::Put, &list, Some(json!({"name": "Weekend errands"})));
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Weekend errands");

    // Add an item.
    let items = format!("{list}/items");
    let (status, body) = execute(
        Method::Post,
        &items,
        Some(json!({"name": "Post office", "description": "Send the parcel"})),
    );
    assert_eq!(status, 200);
    assert_eq!(body["id"], 1);
    assert_eq!(body["description"], "Send the parcel");
    let item = format!("{items}/1");

    // Partial update keeps the description.
    let (status, body) = execute(Method::Put, &item, Some(json!({"name": "Bank"})));
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Bank");
    assert_eq!(body["description"], "Send the parcel");

    let (status, body) = execute(Method::Get, &item, None);
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Bank", "description": "Send the parcel"})
    );

    // Delete the item, then the list.
    let (status, body) = execute(Method::Delete, &item, None);
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Record successfully deleted");

    let (status, body) = execute(Method::Get, &item, None);
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Couldn't find Item with id='1'");

    let (status, _) = execute(Method::Delete, &list, None);
    assert_eq!(status, 200);

    let (status, body) = execute(Method::Get, &list, None);
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Couldn't find TodoList with id='1'");

    let (status, body) = execute(Method::Get, &lists, None);
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}
