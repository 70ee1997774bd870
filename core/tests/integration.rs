//! End-to-end test against the live mock dashboard.
//!
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP: health, imports, filtered listings, totals,
//! type listings, and the error classification paths that need a real
//! transport (404, connection refused, use after close).

use std::time::Duration;

use wartrack_core::{Client, Country, EquipmentFilter, EquipmentType, Error, Status, SystemFilter};

/// Start the mock server on a random port and return its base URL.
fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn dashboard_lifecycle() {
    let base_url = spawn_mock_server();
    let client = Client::builder()
        .base_url(&base_url)
        .timeout(Duration::from_secs(5))
        .header("x-api-key", "test-key")
        .build();

    // Step 1: health comes back unchanged.
    let health = client.health_check().unwrap();
    assert_eq!(health.get("status").and_then(|v| v.as_str()), Some("ok"));

    // Step 2: nothing listed before the imports run.
    let rows = client
        .equipments(Country::Ukraine, &EquipmentFilter::default())
        .unwrap();
    assert!(rows.is_empty(), "expected empty list before import");

    // Step 3: trigger the full import.
    let status = client.import_all().unwrap();
    assert_eq!(status.get("status").and_then(|v| v.as_str()), Some("ok"));

    // Step 4: filtered equipment query.
    let filter = EquipmentFilter {
        types: vec![EquipmentType::Tanks],
        date_start: Some("2024-01-01".into()),
        date_end: Some("2024-01-31".into()),
    };
    let rows = client.equipments(Country::Ukraine, &filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].equipment_type, EquipmentType::Tanks);
    assert_eq!(rows[0].total, 8);
    assert_eq!(rows[0].date.to_string(), "2024-01-01");

    // Step 5: aggregate totals, with and without a country.
    let totals = client.total_equipments(None, &[]).unwrap();
    assert_eq!(totals.len(), 4);
    let totals = client
        .total_equipments(Some(Country::Russia), &[EquipmentType::Tanks])
        .unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].country, Country::Russia);

    // Step 6: system queries with name and status filters.
    let filter = SystemFilter {
        systems: vec!["T-90M".to_string()],
        ..Default::default()
    };
    let systems = client.systems(Country::Russia, &filter).unwrap();
    assert_eq!(systems.len(), 2);

    let filter = SystemFilter {
        systems: vec!["T-90M".to_string()],
        statuses: vec![Status::Captured],
        ..Default::default()
    };
    let systems = client.systems(Country::Russia, &filter).unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].status, Status::Captured);

    let totals = client
        .total_systems(Some(Country::Russia), &["T-90M".to_string()])
        .unwrap();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, 2);

    // Step 7: type listings.
    let types = client.equipment_types().unwrap();
    assert_eq!(types.len(), 11);
    assert_eq!(types[0].key, "tanks");
    let types = client.system_types().unwrap();
    assert_eq!(types.len(), 4);

    // Step 8: individual import triggers report what they loaded.
    let status = client.import_equipments().unwrap();
    assert_eq!(
        status.get("imported").and_then(|v| v.as_str()),
        Some("equipments")
    );
    let status = client.import_all_systems().unwrap();
    assert_eq!(
        status.get("imported").and_then(|v| v.as_str()),
        Some("all_systems")
    );
}

#[test]
fn unknown_path_classifies_as_not_found() {
    let base_url = spawn_mock_server();
    // Nesting the real server under a bogus prefix turns every fixed path
    // into a 404.
    let client = Client::new(&format!("{base_url}/missing"));
    let err = client.health_check().unwrap_err();
    match err {
        Error::NotFound { operation, .. } => assert_eq!(operation, "health_check"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(err.status(), Some(404));
}

#[test]
fn refused_connection_classifies_as_connection_error() {
    // Bind then immediately drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = Client::builder()
        .base_url(&format!("http://{addr}"))
        .timeout(Duration::from_secs(2))
        .build();
    let err = client.import_all().unwrap_err();
    match err {
        Error::Connection { operation, .. } => assert_eq!(operation, "import_all"),
        other => panic!("expected Connection, got {other:?}"),
    }
    assert_eq!(err.status(), None);
}

#[test]
fn close_releases_transport_exactly_once() {
    let base_url = spawn_mock_server();
    let mut client = Client::new(&base_url);
    assert!(client.health_check().is_ok());

    client.close();
    client.close(); // second close is a no-op
    assert!(client.is_closed());
    assert!(matches!(
        client.health_check().unwrap_err(),
        Error::Closed {
            operation: "health_check"
        }
    ));
}
