use macscout::model::{DeviceRecord, DirectoryOutcome, Resolution};
use macscout::MacResolver;

use test_utils::{hardware_id, lease_record, utc, FakeDirectory, FakeLeaseSource};

fn resolver(lease: &FakeLeaseSource, directory: &FakeDirectory) -> MacResolver {
    MacResolver::new(Box::new(lease.clone()), Box::new(directory.clone()))
}

#[tokio::test]
async fn test_lease_hit_on_original_skips_everything_else() {
    let lease = FakeLeaseSource::new(vec![(
        "aa:bb:cc:dd:ee:ff",
        lease_record("10.0.0.5", "2024-01-01 10:00:00"),
    )]);
    let directory = FakeDirectory::not_found();

    let resolution = resolver(&lease, &directory)
        .resolve_one(&hardware_id("aa:bb:cc:dd:ee:ff"))
        .await;

    assert!(matches!(
        resolution,
        Resolution::Lease {
            used_increment: false,
            ..
        }
    ));
    assert_eq!(lease.calls(), vec!["aa:bb:cc:dd:ee:ff"]);
    assert!(directory.calls().is_empty());
}

#[tokio::test]
async fn test_incremented_candidate_is_tried_second() {
    // Only the incremented address has a lease
    let lease = FakeLeaseSource::new(vec![(
        "aa:bb:cc:dd:ef:00",
        lease_record("10.0.0.7", "2024-01-01 10:00:00"),
    )]);
    let directory = FakeDirectory::not_found();

    let resolution = resolver(&lease, &directory)
        .resolve_one(&hardware_id("aa:bb:cc:dd:ee:ff"))
        .await;

    assert!(matches!(
        resolution,
        Resolution::Lease {
            used_increment: true,
            ..
        }
    ));
    assert_eq!(lease.calls(), vec!["aa:bb:cc:dd:ee:ff", "aa:bb:cc:dd:ef:00"]);
    assert!(directory.calls().is_empty());
}

#[tokio::test]
async fn test_directory_is_queried_with_the_original_after_both_lease_misses() {
    let lease = FakeLeaseSource::empty();
    let directory = FakeDirectory::new(DirectoryOutcome::Found(DeviceRecord {
        subscriber: Some("74125".to_string()),
        login_at: Some(utc("2024-03-01T18:45:00.000000Z")),
    }));

    let resolution = resolver(&lease, &directory)
        .resolve_one(&hardware_id("aa:bb:cc:dd:ee:ff"))
        .await;

    assert!(matches!(resolution, Resolution::Device { .. }));
    assert_eq!(lease.calls(), vec!["aa:bb:cc:dd:ee:ff", "aa:bb:cc:dd:ef:00"]);
    assert_eq!(directory.calls(), vec!["aa:bb:cc:dd:ee:ff"]);
}

#[tokio::test]
async fn test_directory_not_found_resolves_to_miss() {
    let lease = FakeLeaseSource::empty();
    let directory = FakeDirectory::not_found();

    let resolution = resolver(&lease, &directory)
        .resolve_one(&hardware_id("aa:bb:cc:dd:ee:ff"))
        .await;

    assert_eq!(
        resolution,
        Resolution::NotFound {
            directory_failed: false
        }
    );
}

#[tokio::test]
async fn test_directory_error_is_marked_on_the_miss() {
    let lease = FakeLeaseSource::empty();
    let directory = FakeDirectory::new(DirectoryOutcome::Error);

    let resolution = resolver(&lease, &directory)
        .resolve_one(&hardware_id("aa:bb:cc:dd:ee:ff"))
        .await;

    assert_eq!(
        resolution,
        Resolution::NotFound {
            directory_failed: true
        }
    );
}

#[tokio::test]
async fn test_resolve_message_keeps_message_order() {
    let lease = FakeLeaseSource::new(vec![(
        "11:22:33:44:55:66",
        lease_record("10.0.0.5", "2024-01-01 10:00:00"),
    )]);
    let directory = FakeDirectory::not_found();

    let results = resolver(&lease, &directory)
        .resolve_message("check AA:BB:CC:DD:EE:FF and 11:22:33:44:55:66 please")
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.to_string(), "aa:bb:cc:dd:ee:ff");
    assert!(matches!(
        results[0].1,
        Resolution::NotFound {
            directory_failed: false
        }
    ));
    assert_eq!(results[1].0.to_string(), "11:22:33:44:55:66");
    assert!(matches!(results[1].1, Resolution::Lease { .. }));
}

#[tokio::test]
async fn test_incremented_value_never_replaces_the_displayed_identifier() {
    let lease = FakeLeaseSource::new(vec![(
        "aa:bb:cc:dd:ef:00",
        lease_record("10.0.0.7", "2024-01-01 10:00:00"),
    )]);
    let directory = FakeDirectory::not_found();

    let results = resolver(&lease, &directory)
        .resolve_message("router aa:bb:cc:dd:ee:ff is offline")
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0.to_string(), "aa:bb:cc:dd:ee:ff");
}

#[tokio::test]
async fn test_message_without_identifiers_yields_no_results() {
    let lease = FakeLeaseSource::empty();
    let directory = FakeDirectory::not_found();

    let results = resolver(&lease, &directory)
        .resolve_message("nothing interesting in here")
        .await;

    assert!(results.is_empty());
    assert!(lease.calls().is_empty());
    assert!(directory.calls().is_empty());
}
