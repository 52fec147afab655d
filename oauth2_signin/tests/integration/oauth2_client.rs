use crate::common::{MockProviderServer, TEST_REDIRECT_URI};
use axum::http::StatusCode;
use oauth2_signin::{IdentityProvider, OAuth2Client, OAuth2Error, UserInfo};

/// Test a full exchange: code for token, token for profile
#[tokio::test]
async fn test_exchange_and_fetch_profile() {
    // Given a provider that accepts the code "abc"
    let server = MockProviderServer::start().await;
    let client = OAuth2Client::new(server.config()).expect("client should build");

    // When the code is exchanged and the profile fetched
    let token = client
        .exchange_code_for_token(TEST_REDIRECT_URI, "abc")
        .await
        .expect("token exchange should succeed");
    let user_info = client
        .fetch_user_info(&token.access_token)
        .await
        .expect("profile fetch should succeed");

    // Then the profile matches what the provider returned
    assert_eq!(token.access_token, "tok1");
    assert_eq!(
        user_info,
        UserInfo {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            picture: "http://x/p.png".to_string(),
        }
    );
    assert_eq!(server.hits(), vec!["token", "userinfo"]);
}

/// Test that the token request carries the grant parameters the provider needs
#[tokio::test]
async fn test_token_request_form_fields() {
    let server = MockProviderServer::start().await;
    let client = OAuth2Client::new(server.config()).unwrap();

    client
        .exchange_code_for_token(TEST_REDIRECT_URI, "abc")
        .await
        .unwrap();

    let requests = server.token_requests();
    assert_eq!(requests.len(), 1);
    let form = &requests[0];
    assert_eq!(form.get("code").map(String::as_str), Some("abc"));
    assert_eq!(
        form.get("grant_type").map(String::as_str),
        Some("authorization_code")
    );
    assert_eq!(
        form.get("redirect_uri").map(String::as_str),
        Some(TEST_REDIRECT_URI)
    );
}

#[tokio::test]
async fn test_rejected_code_is_token_exchange_error() {
    // Given a code the provider does not know
    let server = MockProviderServer::start().await;
    let client = OAuth2Client::new(server.config()).unwrap();

    // When it is exchanged
    let result = client
        .exchange_code_for_token(TEST_REDIRECT_URI, "bad")
        .await;

    // Then the failure is reported as a token exchange error
    assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
    assert_eq!(server.hits(), vec!["token"]);
}

#[tokio::test]
async fn test_wrong_credentials_is_token_exchange_error() {
    let server = MockProviderServer::start().await;
    let mut config = server.config();
    config.client_secret = "not-the-secret".to_string();
    let client = OAuth2Client::new(config).unwrap();

    let result = client
        .exchange_code_for_token(TEST_REDIRECT_URI, "abc")
        .await;

    assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
}

#[tokio::test]
async fn test_unknown_token_is_fetch_user_info_error() {
    let server = MockProviderServer::start().await;
    let client = OAuth2Client::new(server.config()).unwrap();

    let result = client.fetch_user_info("forged").await;

    assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
}

#[tokio::test]
async fn test_provider_outage_is_fetch_user_info_error() {
    let server = MockProviderServer::start().await;
    server.fail_userinfo_with(StatusCode::INTERNAL_SERVER_ERROR);
    let client = OAuth2Client::new(server.config()).unwrap();

    let result = client.fetch_user_info("tok1").await;

    assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
}

#[tokio::test]
async fn test_malformed_profile_is_fetch_user_info_error() {
    let server = MockProviderServer::start().await;
    server.userinfo_body("not json at all");
    let client = OAuth2Client::new(server.config()).unwrap();

    let result = client.fetch_user_info("tok1").await;

    assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
}

#[tokio::test]
async fn test_profile_without_email_is_fetch_user_info_error() {
    // Given a provider whose profile omits the email address
    let server = MockProviderServer::start().await;
    server.userinfo_body(r#"{"id":"u1","picture":"http://x/p.png"}"#);
    let client = OAuth2Client::new(server.config()).unwrap();

    // When the profile is fetched
    let result = client.fetch_user_info("tok1").await;

    // Then the incomplete profile is rejected
    assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
}

#[tokio::test]
async fn test_authorization_url_targets_provider() {
    let server = MockProviderServer::start().await;
    let client = OAuth2Client::new(server.config()).unwrap();

    let url = client
        .authorization_url(TEST_REDIRECT_URI, &["profile", "email"])
        .unwrap();
    let parsed = url::Url::parse(&url).unwrap();
    let query: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();

    assert!(url.starts_with(&format!("{}/oauth2/auth?", server.base_url)));
    assert_eq!(query.get("response_type").map(String::as_str), Some("code"));
    assert_eq!(query.get("scope").map(String::as_str), Some("profile email"));
    assert_eq!(
        query.get("redirect_uri").map(String::as_str),
        Some(TEST_REDIRECT_URI)
    );
    // No network traffic is needed to build the URL
    assert!(server.hits().is_empty());
}
