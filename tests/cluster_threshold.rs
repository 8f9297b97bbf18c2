//! Tests for cluster::threshold module

use chargemap::cluster::{cluster_by_threshold, filter_groups, ProximityGroup};
use chargemap::{ChargeMapError, GeoPoint};

/// Three points on a line: a-b ~0.55 km, b-c ~0.55 km, a-c ~1.1 km.
fn chain_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(12.8900, 77.5800),
        GeoPoint::new(12.8950, 77.5800),
        GeoPoint::new(12.9000, 77.5800),
    ]
}

#[test]
fn test_groups_later_points_within_radius() {
    let points = chain_points();
    let groups = cluster_by_threshold(&points, 0.6).unwrap();

    assert_eq!(groups.len(), 3);
    // a groups with b but not c
    assert_eq!(groups[0].members, vec![1]);
    // b groups with c
    assert_eq!(groups[1].members, vec![2]);
    // c has no later points
    assert!(groups[2].members.is_empty());
}

#[test]
fn test_grouping_is_not_transitive() {
    // b is within radius of both a and c, but a and c are not grouped
    // with each other - overlapping groups are not merged
    let points = chain_points();
    let groups = cluster_by_threshold(&points, 0.6).unwrap();

    assert!(groups[0].members.contains(&1));
    assert!(!groups[0].members.contains(&2));
}

#[test]
fn test_radius_zero_gives_self_singletons() {
    let points = chain_points();
    let groups = cluster_by_threshold(&points, 0.0).unwrap();

    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert!(group.members.is_empty());
        assert_eq!(group.len(), 1);
    }
}

#[test]
fn test_negative_radius_behaves_like_zero() {
    let points = chain_points();
    let groups = cluster_by_threshold(&points, -5.0).unwrap();

    assert!(groups.iter().all(|g| g.members.is_empty()));
}

#[test]
fn test_nan_radius_is_rejected() {
    let points = chain_points();
    let result = cluster_by_threshold(&points, f64::NAN);
    assert!(matches!(
        result,
        Err(ChargeMapError::InvalidParameter { .. })
    ));
}

#[test]
fn test_invalid_point_is_rejected() {
    let points = vec![GeoPoint::new(12.89, 77.58), GeoPoint::new(f64::NAN, 77.58)];
    let result = cluster_by_threshold(&points, 1.0);
    assert!(matches!(
        result,
        Err(ChargeMapError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_empty_input() {
    let groups = cluster_by_threshold(&[], 1.0).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn test_single_point_gives_one_group_with_no_members() {
    let points = vec![GeoPoint::new(12.89, 77.58)];
    let groups = cluster_by_threshold(&points, 1.0).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].anchor, 0);
    assert!(groups[0].members.is_empty());
}

#[test]
fn test_filter_groups_by_min_size() {
    let points = chain_points();
    let groups = cluster_by_threshold(&points, 0.6).unwrap();
    let filtered = filter_groups(groups, 2);

    // Only the two-point groups survive
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|g| g.len() >= 2));
}

#[test]
fn test_group_points_resolution() {
    let points = chain_points();
    let group = ProximityGroup {
        anchor: 0,
        members: vec![1],
    };

    let resolved = group.points(&points);
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0], points[0]);
    assert_eq!(resolved[1], points[1]);
}

#[test]
fn test_everything_within_large_radius() {
    let points = chain_points();
    let groups = cluster_by_threshold(&points, 100.0).unwrap();

    assert_eq!(groups[0].members, vec![1, 2]);
    assert_eq!(groups[1].members, vec![2]);
    assert!(groups[2].members.is_empty());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_variant_matches_sequential() {
    use chargemap::cluster::cluster_by_threshold_parallel;

    let points = chain_points();
    let sequential = cluster_by_threshold(&points, 0.6).unwrap();
    let parallel = cluster_by_threshold_parallel(&points, 0.6).unwrap();

    assert_eq!(sequential, parallel);
}
