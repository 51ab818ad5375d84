mod common;

use common::user_input;
use s3_actions::{
    app::AppBuilder,
    domain::{
        models::EVENT_SIGNED_URL,
        value_objects::{BucketName, ObjectKey},
    },
    ports::{host::ServiceName, services::ConfigFlowService},
    InMemoryClientFactory,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_put_copy_presign_delete_against_memory_backend() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("front_door.jpg");
    std::fs::write(&file, b"jpeg bytes").unwrap();

    let factory = InMemoryClientFactory::new();
    let store = factory.client();
    let app = AppBuilder::new()
        .with_client_factory(Arc::new(factory))
        .with_allowed_dir(dir.path())
        .build()
        .await
        .unwrap();
    app.config_flow.step_user(user_input("AKIA1")).await.unwrap();
    let mut events = app.event_bus.subscribe();

    let call = |service: &'static str, data: serde_json::Value| {
        let registry = app.service_registry.clone();
        async move {
            registry
                .call(&ServiceName::new("s3", service), data)
                .await
                .unwrap()
        }
    };

    call(
        "put",
        json!({
            "bucket": "b1",
            "file_path": file.to_str().unwrap(),
            "storage_class": "STANDARD_IA",
            "content_type": "image/jpeg",
        }),
    )
    .await;

    let b1 = BucketName::new("b1").unwrap();
    let b2 = BucketName::new("b2").unwrap();
    let original = ObjectKey::new("front_door.jpg").unwrap();
    let copied = ObjectKey::new("archive/front_door.jpg").unwrap();

    let stored = store.get_object(&b1, &original).await.unwrap();
    assert_eq!(&stored.data[..], b"jpeg bytes");
    assert_eq!(stored.storage_class.as_deref(), Some("STANDARD_IA"));
    assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));

    call(
        "copy",
        json!({
            "bucket_source": "b1",
            "bucket_destination": "b2",
            "key_source": "front_door.jpg",
            "key_destination": "archive/front_door.jpg",
        }),
    )
    .await;
    assert!(store.object_exists(&b2, &copied).await);

    call(
        "signed_url",
        json!({ "bucket": "b2", "key": "archive/front_door.jpg", "message": "someone at the door" }),
    )
    .await;
    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, EVENT_SIGNED_URL);
    assert_eq!(event.data["message"], "someone at the door");
    assert!(event.data["url"]
        .as_str()
        .unwrap()
        .contains("X-Amz-Expires=3600"));

    call("delete", json!({ "bucket": "b1", "key": "front_door.jpg" })).await;
    assert!(!store.object_exists(&b1, &original).await);
    assert!(store.object_exists(&b2, &copied).await);
}

#[tokio::test]
async fn test_put_outside_allowlist_stores_nothing() {
    let allowed = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let file = other.path().join("secret.txt");
    std::fs::write(&file, b"do not upload").unwrap();

    let factory = InMemoryClientFactory::new();
    let store = factory.client();
    let app = AppBuilder::new()
        .with_client_factory(Arc::new(factory))
        .with_allowed_dir(allowed.path())
        .build()
        .await
        .unwrap();
    app.config_flow.step_user(user_input("AKIA1")).await.unwrap();

    app.service_registry
        .call(
            &ServiceName::new("s3", "put"),
            json!({ "bucket": "b1", "file_path": file.to_str().unwrap() }),
        )
        .await
        .unwrap();

    let key = ObjectKey::new("secret.txt").unwrap();
    assert!(!store.object_exists(&BucketName::new("b1").unwrap(), &key).await);
}
