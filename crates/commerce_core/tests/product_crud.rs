use commerce_core::{
    Client, DbError, Product, ProductFilter, ProductRepository, StoreError, Vendor,
    VendorRepository, PRODUCT_ENTITY,
};

fn seeded_client() -> (Client, Vendor, Vendor) {
    let client = Client::open_in_memory().unwrap();
    let acme = client
        .add_vendor(Vendor::new("Acme", "sales@acme.test"))
        .unwrap();
    let globex = client
        .add_vendor(Vendor::new("Globex", "hello@globex.test"))
        .unwrap();
    (client, acme, globex)
}

#[test]
fn create_and_get_roundtrip_preserves_price() {
    let (client, acme, _) = seeded_client();

    let created = client
        .add_product(Product::new("Anvil", 149.99, acme.vendor_id.clone()))
        .unwrap();
    let loaded = client.get_product(&created.product_id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.price, 149.99);
    assert_eq!(loaded.vendor_id, acme.vendor_id);
}

#[test]
fn create_for_unknown_vendor_is_storage_error_not_conflict() {
    let (client, _, _) = seeded_client();

    let err = client
        .add_product(Product::new("Orphan", 1.0, "no-such-vendor"))
        .unwrap_err();

    assert!(matches!(err, StoreError::Db(DbError::Sqlite(_))));
    assert!(client
        .list_products(&ProductFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn list_filters_by_vendor() {
    let (client, acme, globex) = seeded_client();
    let anvil = client
        .add_product(Product::new("Anvil", 10.0, acme.vendor_id.clone()))
        .unwrap();
    let rocket = client
        .add_product(Product::new("Rocket", 250.0, acme.vendor_id.clone()))
        .unwrap();
    let widget = client
        .add_product(Product::new("Widget", 2.5, globex.vendor_id.clone()))
        .unwrap();

    let from_acme = client
        .list_products(&ProductFilter::by_vendor(&acme.vendor_id))
        .unwrap();
    assert_eq!(from_acme, vec![anvil.clone(), rocket.clone()]);

    let all = client.list_products(&ProductFilter::default()).unwrap();
    assert_eq!(all, vec![anvil, rocket, widget]);

    let none = client
        .list_products(&ProductFilter::by_vendor("unknown"))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn update_can_move_product_between_vendors() {
    let (client, acme, globex) = seeded_client();
    let mut product = client
        .add_product(Product::new("Anvil", 10.0, acme.vendor_id.clone()))
        .unwrap();

    product.vendor_id = globex.vendor_id.clone();
    product.price = 12.0;
    let updated = client.update_product(&product).unwrap();

    assert_eq!(updated.vendor_id, globex.vendor_id);
    assert_eq!(updated.price, 12.0);
    assert_eq!(updated.name, "Anvil");
    assert!(client
        .list_products(&ProductFilter::by_vendor(&acme.vendor_id))
        .unwrap()
        .is_empty());
}

#[test]
fn update_unknown_id_is_not_found() {
    let (client, acme, _) = seeded_client();

    let mut ghost = Product::new("Ghost", 1.0, acme.vendor_id);
    ghost.product_id = "ghost".to_string();
    let err = client.update_product(&ghost).unwrap_err();

    assert!(matches!(
        err,
        StoreError::NotFound { entity: PRODUCT_ENTITY, ref id } if id == "ghost"
    ));
}

#[test]
fn delete_removes_row_and_tolerates_repeats() {
    let (client, acme, _) = seeded_client();
    let product = client
        .add_product(Product::new("Anvil", 10.0, acme.vendor_id))
        .unwrap();

    client.delete_product(&product.product_id).unwrap();
    client.delete_product(&product.product_id).unwrap();

    let err = client.get_product(&product.product_id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { entity: "product", .. }
    ));
}
