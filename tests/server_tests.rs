use serde_json::{Value, json};
use shelf::graphql::{build_schema, serve};
use shelf::storage::Store;
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn start_server(graphiql: bool) -> SocketAddr {
    let store = Store::open_in_memory().unwrap();
    store.seed(3).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, build_schema(store), graphiql));
    addr
}

#[tokio::test]
async fn test_post_graphql() {
    let addr = start_server(false).await;

    let response: Value = reqwest::Client::new()
        .post(format!("http://{addr}/graphql"))
        .json(&json!({ "query": "{ books { title authorName } }" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        response["data"]["books"],
        json!([
            { "title": "Book 1", "authorName": "Author 1" },
            { "title": "Book 2", "authorName": "Author 2" },
            { "title": "Book 3", "authorName": "Author 3" }
        ])
    );
}

#[tokio::test]
async fn test_post_mutation_with_variables() {
    let addr = start_server(false).await;
    let client = reqwest::Client::new();

    let response: Value = client
        .post(format!("http://{addr}/graphql"))
        .json(&json!({
            "query": concat!(
                "mutation Add($name: String!) ",
                "{ addAuthor(name: $name) { id name books { id } } }"
            ),
            "variables": { "name": "Mary Shelley" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        response["data"]["addAuthor"],
        json!({ "id": "4", "name": "Mary Shelley", "books": [] })
    );
}

#[tokio::test]
async fn test_get_graphql_query_string() {
    let addr = start_server(false).await;

    // { authors(authorIds: ["2"]) { name } }
    let query = "%7B%20authors(authorIds%3A%20%5B%222%22%5D)%20%7B%20name%20%7D%20%7D";
    let url = format!("http://{addr}/graphql?query={query}");
    let response: Value = reqwest::get(url).await.unwrap().json().await.unwrap();

    assert_eq!(response["data"]["authors"], json!([{ "name": "Author 2" }]));
}

#[tokio::test]
async fn test_graphiql_page_toggle() {
    let with_ui = start_server(true).await;
    let page = reqwest::get(format!("http://{with_ui}/"))
        .await
        .unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().to_lowercase().contains("graphiql"));

    let without_ui = start_server(false).await;
    let page = reqwest::get(format!("http://{without_ui}/"))
        .await
        .unwrap();
    assert_eq!(page.status(), reqwest::StatusCode::NOT_FOUND);
}
