mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn empty_menu_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/drinks")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": 404,
            "message": "Resource you are trying to modify is not found"
        })
    );
    Ok(())
}

#[tokio::test]
async fn public_list_hides_ingredient_names() -> Result<()> {
    let server = common::spawn_server().await?;
    let id = common::create_drink(&server, &common::water()).await?;

    let res = server.client.get(server.url("/drinks")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [{
                "id": id,
                "title": "Water",
                "recipe": [{"color": "blue", "parts": 1}]
            }]
        })
    );
    assert!(!body.to_string().contains("H2O"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/coffee")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], 404);
    Ok(())
}

#[tokio::test]
async fn unsupported_method_is_405_with_envelope() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.put(server.url("/drinks")).send().await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"success": false, "error": 405, "message": "Method not allowed"})
    );
    Ok(())
}
