//! Tests for cluster::density module

use chargemap::cluster::{cluster_by_density, summarize_clusters, DensityConfig, NOISE};
use chargemap::geo_utils::haversine_distance;
use chargemap::{ChargeMapError, GeoPoint};

/// Four points within ~200 m of (12.89, 77.58) plus an outlier ~50 km
/// north.
fn tight_cluster_with_outlier() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(12.8900, 77.5800),
        GeoPoint::new(12.8910, 77.5805),
        GeoPoint::new(12.8905, 77.5810),
        GeoPoint::new(12.8895, 77.5795),
        GeoPoint::new(13.3400, 77.5800),
    ]
}

#[test]
fn test_tight_cluster_labeled_outlier_noise() {
    let points = tight_cluster_with_outlier();

    // Sanity: the outlier really is ~50 km away
    let dist = haversine_distance(&points[0], &points[4]);
    assert!((dist - 50.0).abs() < 2.0, "outlier at {dist} km");

    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 3,
    };
    let labels = cluster_by_density(&points, &config).unwrap();

    assert_eq!(labels.len(), 5);
    assert_eq!(labels[4], NOISE);

    let shared = labels[0];
    assert!(shared >= 0);
    assert!(labels[..4].iter().all(|&l| l == shared));
}

#[test]
fn test_every_point_labeled_exactly_once() {
    let points = tight_cluster_with_outlier();
    let labels = cluster_by_density(&points, &DensityConfig::default()).unwrap();

    assert_eq!(labels.len(), points.len());

    let noise = labels.iter().filter(|&&l| l == NOISE).count();
    let clustered = labels.iter().filter(|&&l| l >= 0).count();
    assert_eq!(noise + clustered, points.len());
}

#[test]
fn test_deterministic_for_identical_input() {
    let points = tight_cluster_with_outlier();
    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 3,
    };

    let first = cluster_by_density(&points, &config).unwrap();
    let second = cluster_by_density(&points, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_two_separate_clusters() {
    // Two tight triples ~50 km apart
    let points = vec![
        GeoPoint::new(12.8900, 77.5800),
        GeoPoint::new(12.8905, 77.5805),
        GeoPoint::new(12.8910, 77.5810),
        GeoPoint::new(13.3400, 77.5800),
        GeoPoint::new(13.3405, 77.5805),
        GeoPoint::new(13.3410, 77.5810),
    ];

    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 2,
    };
    let labels = cluster_by_density(&points, &config).unwrap();

    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_ne!(labels[0], labels[3]);
    assert!(labels.iter().all(|&l| l >= 0));
}

#[test]
fn test_sparse_points_are_all_noise() {
    // Points ~5 km apart with a 1 km epsilon
    let points = vec![
        GeoPoint::new(12.80, 77.58),
        GeoPoint::new(12.85, 77.58),
        GeoPoint::new(12.90, 77.58),
    ];

    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 2,
    };
    let labels = cluster_by_density(&points, &config).unwrap();

    assert!(labels.iter().all(|&l| l == NOISE));
}

#[test]
fn test_cluster_across_antimeridian() {
    // A chain straddling ±180°; the seam gap is ~0.89 km
    let points = vec![
        GeoPoint::new(0.0, 179.992),
        GeoPoint::new(0.0, 179.996),
        GeoPoint::new(0.0, -179.996),
        GeoPoint::new(0.0, -179.992),
    ];

    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 1,
    };
    let labels = cluster_by_density(&points, &config).unwrap();

    let shared = labels[0];
    assert!(shared >= 0);
    assert!(labels.iter().all(|&l| l == shared), "labels {labels:?}");
}

#[test]
fn test_empty_input() {
    let labels = cluster_by_density(&[], &DensityConfig::default()).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn test_invalid_epsilon_rejected() {
    let points = tight_cluster_with_outlier();

    for epsilon_km in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let config = DensityConfig {
            epsilon_km,
            min_samples: 3,
        };
        let result = cluster_by_density(&points, &config);
        assert!(
            matches!(result, Err(ChargeMapError::InvalidParameter { .. })),
            "epsilon {epsilon_km} accepted"
        );
    }
}

#[test]
fn test_zero_min_samples_rejected() {
    let points = tight_cluster_with_outlier();
    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 0,
    };
    let result = cluster_by_density(&points, &config);
    assert!(matches!(
        result,
        Err(ChargeMapError::InvalidParameter { .. })
    ));
}

#[test]
fn test_invalid_point_rejected() {
    let points = vec![GeoPoint::new(12.89, 77.58), GeoPoint::new(12.89, f64::NAN)];
    let result = cluster_by_density(&points, &DensityConfig::default());
    assert!(matches!(
        result,
        Err(ChargeMapError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_summarize_drops_noise() {
    let points = tight_cluster_with_outlier();
    let config = DensityConfig {
        epsilon_km: 1.0,
        min_samples: 3,
    };
    let labels = cluster_by_density(&points, &config).unwrap();

    let summaries = summarize_clusters(&points, &labels);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].point_count, 4);

    // The suggested site sits inside the tight cluster, far from the
    // outlier
    let center = summaries[0].center;
    assert!(haversine_distance(&center, &points[0]) < 1.0);
    assert!(haversine_distance(&center, &points[4]) > 40.0);
}

#[test]
fn test_summarize_all_noise_is_empty() {
    let points = vec![GeoPoint::new(12.80, 77.58), GeoPoint::new(12.90, 77.58)];
    let labels = vec![NOISE, NOISE];
    assert!(summarize_clusters(&points, &labels).is_empty());
}
