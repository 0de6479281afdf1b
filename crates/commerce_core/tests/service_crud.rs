use commerce_core::{Client, Service, ServiceRepository, StoreError};

#[test]
fn service_lifecycle() {
    let client = Client::open_in_memory().unwrap();

    let mut setup = client.add_service(Service::new("Setup", 75.0)).unwrap();
    let repair = client.add_service(Service::new("Repair", 120.0)).unwrap();
    assert_eq!(client.list_services().unwrap(), vec![setup.clone(), repair.clone()]);

    setup.price = 80.0;
    let updated = client.update_service(&setup).unwrap();
    assert_eq!(updated.price, 80.0);
    assert_eq!(client.get_service(&setup.service_id).unwrap(), updated);

    client.delete_service(&repair.service_id).unwrap();
    assert_eq!(client.list_services().unwrap(), vec![updated]);
}

#[test]
fn missing_service_is_not_found_for_get_and_update_but_not_delete() {
    let client = Client::open_in_memory().unwrap();

    assert!(matches!(
        client.get_service("missing"),
        Err(StoreError::NotFound { entity: "service", .. })
    ));

    let mut ghost = Service::new("Ghost", 1.0);
    ghost.service_id = "missing".to_string();
    assert!(matches!(
        client.update_service(&ghost),
        Err(StoreError::NotFound { entity: "service", .. })
    ));

    client.delete_service("missing").unwrap();
}
