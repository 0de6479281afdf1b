use commerce_core::{
    Client, DbError, Product, ProductFilter, ProductRepository, StoreError, Vendor,
    VendorRepository, VENDOR_ENTITY,
};

fn acme() -> Vendor {
    let mut vendor = Vendor::new("Acme", "sales@acme.test");
    vendor.contact = "Wile".to_string();
    vendor.phone = "555-0199".to_string();
    vendor.address = "Desert Rd".to_string();
    vendor
}

#[test]
fn create_and_get_roundtrip() {
    let client = Client::open_in_memory().unwrap();

    let created = client.add_vendor(acme()).unwrap();
    assert!(!created.vendor_id.is_empty());

    let loaded = client.get_vendor(&created.vendor_id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.contact, "Wile");
}

#[test]
fn get_unknown_id_reports_vendor_entity() {
    let client = Client::open_in_memory().unwrap();

    let err = client.get_vendor("nope").unwrap_err();
    match err {
        StoreError::NotFound { entity, id } => {
            assert_eq!(entity, VENDOR_ENTITY);
            assert_eq!(id, "nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_keeps_contact_and_phone_distinct() {
    let client = Client::open_in_memory().unwrap();
    let mut vendor = client.add_vendor(acme()).unwrap();

    vendor.contact = "Road Runner".to_string();
    vendor.phone = "555-0200".to_string();
    let updated = client.update_vendor(&vendor).unwrap();

    assert_eq!(updated.contact, "Road Runner");
    assert_eq!(updated.phone, "555-0200");
    assert_eq!(updated, client.get_vendor(&vendor.vendor_id).unwrap());
}

#[test]
fn update_unknown_id_is_not_found() {
    let client = Client::open_in_memory().unwrap();

    let mut ghost = acme();
    ghost.vendor_id = "ghost".to_string();
    let err = client.update_vendor(&ghost).unwrap_err();

    assert!(matches!(
        err,
        StoreError::NotFound { entity: "vendor", ref id } if id == "ghost"
    ));
}

#[test]
fn duplicate_email_conflicts() {
    let client = Client::open_in_memory().unwrap();
    client.add_vendor(acme()).unwrap();

    let err = client
        .add_vendor(Vendor::new("Acme Clone", "sales@acme.test"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict));
}

#[test]
fn update_to_taken_email_conflicts() {
    let client = Client::open_in_memory().unwrap();
    client.add_vendor(acme()).unwrap();
    let mut globex = client
        .add_vendor(Vendor::new("Globex", "hello@globex.test"))
        .unwrap();

    globex.email = "sales@acme.test".to_string();
    let err = client.update_vendor(&globex).unwrap_err();

    assert!(matches!(err, StoreError::Conflict));
    assert_eq!(
        client.get_vendor(&globex.vendor_id).unwrap().email,
        "hello@globex.test"
    );
}

#[test]
fn vendors_without_email_do_not_conflict() {
    let client = Client::open_in_memory().unwrap();

    let first = client.add_vendor(Vendor::new("Initech", "")).unwrap();
    let second = client.add_vendor(Vendor::new("Hooli", "")).unwrap();

    assert_eq!(client.get_vendor(&first.vendor_id).unwrap(), first);
    assert_eq!(client.get_vendor(&second.vendor_id).unwrap(), second);
    assert_eq!(client.list_vendors().unwrap(), vec![first, second]);
}

#[test]
fn list_returns_all_vendors_in_insertion_order() {
    let client = Client::open_in_memory().unwrap();
    assert!(client.list_vendors().unwrap().is_empty());

    let first = client.add_vendor(acme()).unwrap();
    let second = client
        .add_vendor(Vendor::new("Globex", "hello@globex.test"))
        .unwrap();

    assert_eq!(client.list_vendors().unwrap(), vec![first, second]);
}

#[test]
fn delete_is_idempotent() {
    let client = Client::open_in_memory().unwrap();
    let vendor = client.add_vendor(acme()).unwrap();

    client.delete_vendor(&vendor.vendor_id).unwrap();
    client.delete_vendor(&vendor.vendor_id).unwrap();

    assert!(matches!(
        client.get_vendor(&vendor.vendor_id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn delete_of_referenced_vendor_fails_with_storage_error() {
    let client = Client::open_in_memory().unwrap();
    let vendor = client.add_vendor(acme()).unwrap();
    client
        .add_product(Product::new("Anvil", 99.5, vendor.vendor_id.clone()))
        .unwrap();

    let err = client.delete_vendor(&vendor.vendor_id).unwrap_err();

    assert!(matches!(err, StoreError::Db(DbError::Sqlite(_))));
    assert_eq!(client.get_vendor(&vendor.vendor_id).unwrap(), vendor);
    assert_eq!(
        client
            .list_products(&ProductFilter::by_vendor(&vendor.vendor_id))
            .unwrap()
            .len(),
        1
    );
}
