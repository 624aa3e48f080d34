use contacts_client::{ContactContent, ContactId, ContactPatch};

mod common;

fn ada() -> ContactContent {
    ContactContent::new("Ada", "Lovelace", "555-0100")
}

fn unknown_id() -> ContactId {
    "000000000000000000000000".parse().unwrap()
}

#[tokio::test]
async fn create_then_list() {
    let client = common::setup_client();
    let before = client.get_contacts().await.unwrap();

    let id = client.create_contact(ada()).await.unwrap();

    let after = client.get_contacts().await.unwrap();
    assert_eq!(after.len(), before.len() + 1);

    let created = after.iter().find(|c| c.id == id).unwrap();
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.last_name, "Lovelace");
    assert_eq!(created.phone_number, "555-0100");
}

#[tokio::test]
async fn create_twice_gives_two_contacts() {
    let client = common::setup_client();
    let content = ContactContent::new("Grace", "Hopper", "555-0102");
    let before = client
        .get_contacts_by_name("Grace", "Hopper")
        .await
        .unwrap()
        .len();

    let first = client.create_contact(content.clone()).await.unwrap();
    let second = client.create_contact(content).await.unwrap();
    assert_ne!(first, second);

    let after = client.get_contacts_by_name("Grace", "Hopper").await.unwrap();
    assert_eq!(after.len(), before + 2);
}

#[tokio::test]
async fn update() {
    let client = common::setup_client();
    let id = client.create_contact(ada()).await.unwrap();

    let patch = ContactPatch::default().with_first_name("Augusta");
    assert!(client.update_contact(&id, &patch).await.unwrap());

    let contacts = client.get_contacts().await.unwrap();
    let updated = contacts.iter().find(|c| c.id == id).unwrap();
    assert_eq!(
        updated.content(),
        ContactContent::new("Augusta", "Lovelace", "555-0100")
    );
}

#[tokio::test]
async fn update_unknown() {
    let client = common::setup_client();

    let patch = ContactPatch::default().with_first_name("Augusta");
    let err = client
        .update_contact(&unknown_id(), &patch)
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err}");
}

#[tokio::test]
async fn update_empty_patch() {
    let client = common::setup_client();
    let id = client.create_contact(ada()).await.unwrap();

    let err = client
        .update_contact(&id, &ContactPatch::default())
        .await
        .unwrap_err();
    assert!(err.is_bad_request(), "got {err}");
}

#[tokio::test]
async fn delete() {
    let client = common::setup_client();
    let id = client.create_contact(ada()).await.unwrap();

    assert!(client.delete_contact(&id).await.unwrap());

    let contacts = client.get_contacts().await.unwrap();
    assert!(contacts.iter().all(|c| c.id != id));

    let err = client.delete_contact(&id).await.unwrap_err();
    assert!(err.is_not_found(), "got {err}");
}

#[tokio::test]
async fn delete_unknown() {
    let client = common::setup_client();

    let err = client.delete_contact(&unknown_id()).await.unwrap_err();
    assert!(err.is_not_found(), "got {err}");
}
