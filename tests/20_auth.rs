mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn detail_with(server: &common::TestServer, authorization: Option<String>) -> Result<(StatusCode, Value)> {
    let mut req = server.client.get(server.url("/drinks-detail"));
    if let Some(value) = authorization {
        req = req.header("Authorization", value);
    }
    let res = req.send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

#[tokio::test]
async fn missing_header_is_unauthorized() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = detail_with(&server, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    assert_eq!(body["message"]["code"], "authorization_header_missing");
    Ok(())
}

#[tokio::test]
async fn malformed_headers_are_unauthorized() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = common::sign(&common::claims(common::ALL_SCOPES));

    for header in [
        format!("bearer {}", token),
        format!("Token {}", token),
        "Bearer".to_string(),
        format!("Bearer {} extra", token),
    ] {
        let (status, body) = detail_with(&server, Some(header.clone())).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
        assert_eq!(body["message"]["code"], "invalid_header", "header {:?}", header);
    }
    Ok(())
}

#[tokio::test]
async fn missing_scope_is_401_not_403() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = detail_with(&server, Some(common::bearer(&["post:drinks"]))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!({"code": "unauthorized", "description": "Permission not found."})
    );
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut claims = common::claims(common::ALL_SCOPES);
    claims["exp"] = json!(chrono::Utc::now().timestamp() - 3600);
    let (status, body) = detail_with(&server, Some(format!("Bearer {}", common::sign(&claims)))).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"]["code"], "invalid_claims");
    assert_eq!(body["message"]["description"], "Token expired.");
    Ok(())
}

#[tokio::test]
async fn wrong_audience_or_issuer_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut other_audience = common::claims(common::ALL_SCOPES);
    other_audience["aud"] = json!("another-api");
    let mut other_issuer = common::claims(common::ALL_SCOPES);
    other_issuer["iss"] = json!("https://evil.test/");

    for claims in [other_audience, other_issuer] {
        let (status, body) = detail_with(&server, Some(format!("Bearer {}", common::sign(&claims)))).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"]["code"], "invalid_claims");
    }
    Ok(())
}

#[tokio::test]
async fn tampered_token_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let token = common::sign(&common::claims(&["post:drinks"]));
    let forged_payload = common::sign(&common::claims(common::ALL_SCOPES));
    // Keep the original signature, swap in a payload with more scopes
    let parts: Vec<&str> = token.split('.').collect();
    let forged: Vec<&str> = forged_payload.split('.').collect();
    let tampered = format!("{}.{}.{}", parts[0], forged[1], parts[2]);

    let (status, body) = detail_with(&server, Some(format!("Bearer {}", tampered))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"]["code"], "invalid_signature");
    Ok(())
}

#[tokio::test]
async fn scope_string_claim_is_accepted() -> Result<()> {
    let server = common::spawn_server().await?;
    common::create_drink(&server, &common::water()).await?;

    let mut claims = common::claims(&[]);
    claims["scope"] = json!("openid get:drinks-detail");
    let (status, body) = detail_with(&server, Some(format!("Bearer {}", common::sign(&claims)))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "H2O");
    Ok(())
}

#[tokio::test]
async fn auth_is_checked_before_the_body() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/drinks"))
        .header("Authorization", common::bearer(&["get:drinks-detail"]))
        .body("not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
