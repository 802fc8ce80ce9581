use api::store::{AuditAction, AuditEntry};
use payloads::draft::DraftInput;
use payloads::{FormDraft, PropertyField, PropertyId};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{
    assert_status_code, fill_draft, image_upload, property_draft_a, spawn_app,
};

#[tokio::test]
async fn create_read_update_delete_property() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;

    let created = app.create_test_property().await?;
    assert_eq!(created.title, "Sunny loft near the canal");
    assert_eq!(created.price_per_night, dec!(120));
    assert_eq!(created.user.username, "alice");
    assert_eq!(created.images.len(), 1);

    let fetched = app.client.get_property(&created.id).await?;
    assert_eq!(fetched, created);

    // the stored image is served back from its url
    let image = app
        .client
        .inner_client
        .get(&fetched.images[0].url)
        .send()
        .await?;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(
        image.bytes().await?.as_ref(),
        image_upload("loft.png").data.as_slice()
    );

    let mut edit = FormDraft::for_property(&fetched);
    fill_draft(
        &mut edit,
        &[
            (PropertyField::Title, "Sunny loft"),
            (PropertyField::Baths, "2"),
        ],
    );
    let updated = app.client.update_property(&created.id, &edit).await?;
    assert_eq!(updated.title, "Sunny loft");
    assert_eq!(updated.baths, 2);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.images, created.images);

    app.client.delete_property(&created.id).await?;
    assert_status_code(
        app.client.get_property(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn create_requires_login() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_status_code(
        app.client.create_property(&property_draft_a()).await,
        StatusCode::UNAUTHORIZED,
    );
    assert!(app.store.audit_log().is_empty());

    Ok(())
}

#[tokio::test]
async fn create_rejects_incomplete_listing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;

    let mut draft = property_draft_a();
    fill_draft(&mut draft, &[(PropertyField::City, "")]);
    assert_status_code(
        app.client.create_property(&draft).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}

#[tokio::test]
async fn only_the_owner_can_edit_or_delete() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    let mut edit = FormDraft::for_property(&property);
    fill_draft(&mut edit, &[(PropertyField::Title, "Bob's loft now")]);

    app.login_bob().await?;
    assert_status_code(
        app.client.update_property(&property.id, &edit).await,
        StatusCode::FORBIDDEN,
    );
    assert_status_code(
        app.client.delete_property(&property.id).await,
        StatusCode::FORBIDDEN,
    );

    app.client.logout().await?;
    assert_status_code(
        app.client.update_property(&property.id, &edit).await,
        StatusCode::UNAUTHORIZED,
    );
    assert_status_code(
        app.client.delete_property(&property.id).await,
        StatusCode::UNAUTHORIZED,
    );

    // anyone may still view it
    let fetched = app.client.get_property(&property.id).await?;
    assert_eq!(fetched.title, property.title);

    Ok(())
}

#[tokio::test]
async fn unknown_property_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let missing = PropertyId(404);

    assert_status_code(
        app.client.get_property(&missing).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.delete_property(&missing).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn replacing_images_changes_gallery() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    let mut edit = FormDraft::for_property(&property);
    edit.apply(DraftInput::Images {
        uploads: vec![image_upload("front.png"), image_upload("back.png")],
        preview: Some("blob:front".into()),
    });
    let updated = app.client.update_property(&property.id, &edit).await?;

    assert_eq!(updated.images.len(), 2);
    assert_ne!(updated.images[0], property.images[0]);
    let old_image = app
        .client
        .inner_client
        .get(&property.images[0].url)
        .send()
        .await?;
    assert_eq!(old_image.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn audit_log_records_submitted_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    let mut edit = FormDraft::for_property(&property);
    for title in ["S", "Su", "Sunny"] {
        fill_draft(&mut edit, &[(PropertyField::Title, title)]);
    }
    fill_draft(&mut edit, &[(PropertyField::Neighborhood, "De Pijp")]);
    app.client.update_property(&property.id, &edit).await?;
    app.client.delete_property(&property.id).await?;

    let log = app.store.audit_log();
    let mut created_fields = PropertyField::REQUIRED.to_vec();
    created_fields.sort();
    assert_eq!(
        log,
        vec![
            AuditEntry {
                action: AuditAction::Created,
                property_id: property.id,
                username: "alice".into(),
                fields: created_fields,
            },
            AuditEntry {
                action: AuditAction::Updated,
                property_id: property.id,
                username: "alice".into(),
                fields: vec![PropertyField::Title, PropertyField::Neighborhood],
            },
            AuditEntry {
                action: AuditAction::Deleted,
                property_id: property.id,
                username: "alice".into(),
                fields: vec![],
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn identity_fields_cannot_be_submitted() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    let form = reqwest::multipart::Form::new()
        .text("property[id]", "99")
        .text("property[user]", "bob")
        .text("property[title]", "Renamed");
    let response = app
        .client
        .inner_client
        .patch(format!(
            "{}/api/properties/{}",
            app.client.address, property.id
        ))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = app.client.get_property(&property.id).await?;
    assert_eq!(fetched.id, property.id);
    assert_eq!(fetched.user.username, "alice");
    assert_eq!(fetched.title, "Renamed");

    Ok(())
}
