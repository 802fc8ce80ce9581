use reqwest::StatusCode;
use test_helpers::{
    alice_credentials, assert_status_code, bob_credentials, spawn_app,
};

#[tokio::test]
async fn fresh_session_is_not_authenticated() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let session = app.session().await?;
    assert!(!session.authenticated);
    assert_eq!(session.username(), None);

    Ok(())
}

#[tokio::test]
async fn login_and_logout() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;

    let session = app.session().await?;
    assert!(session.authenticated);
    assert_eq!(session.username(), Some("alice"));

    app.login_bob().await?;
    assert_eq!(app.session().await?.username(), Some("bob"));

    app.client.logout().await?;
    assert!(!app.session().await?.authenticated);

    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    app.client.logout().await?;

    let mut credentials = alice_credentials();
    credentials.password = bob_credentials().password;
    assert_status_code(
        app.client.login(&credentials).await,
        StatusCode::UNAUTHORIZED,
    );

    let mut credentials = alice_credentials();
    credentials.username = "mallory".into();
    assert_status_code(
        app.client.login(&credentials).await,
        StatusCode::UNAUTHORIZED,
    );
    assert!(!app.session().await?.authenticated);

    Ok(())
}
