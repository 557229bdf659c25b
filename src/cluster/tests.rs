//! End-to-end properties of the cluster engine

use super::*;
use crate::geo::{MapPoint, MapRect};
use crate::post::Topic;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reference_viewport() -> MapRect {
    MapRect::new(0.0, 0.0, 10_000.0, 14_000.0)
}

/// Random posts spread over an area somewhat larger than the viewport
fn scattered_posts(seed: u64, count: usize, viewport: &MapRect) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let topic = Topic::ALL[rng.gen_range(0..Topic::ALL.len())];
            let x = viewport.x - viewport.width + rng.gen::<f64>() * viewport.width * 3.0;
            let y = viewport.y - viewport.height + rng.gen::<f64>() * viewport.height * 3.0;
            Post::new(topic, MapPoint::new(x, y))
        })
        .collect()
}

#[test]
fn test_grid_size_matches_vertical_count() {
    let engine = ClusterEngine::default();
    for (width, height) in [(10_000.0, 14_000.0), (500.0, 100.0), (1.0, 1e3), (320.0, 640.0)] {
        let viewport = MapRect::new(0.0, 0.0, width, height);
        let cells = engine.compute_grid(&viewport).unwrap();
        let rows = grid::vertical_count(&viewport, width * 0.7).unwrap();

        assert_eq!(cells.len(), 3 * rows);
        assert!(rows >= 3 && rows % 2 == 1);
    }
}

#[test]
fn test_grid_is_deterministic() {
    let engine = ClusterEngine::default();
    let viewport = MapRect::new(123.5, -77.25, 4321.0, 9876.0);
    assert_eq!(
        engine.compute_grid(&viewport).unwrap(),
        engine.compute_grid(&viewport).unwrap()
    );
}

#[test]
fn test_grid_depends_only_on_dimensions() {
    let engine = ClusterEngine::default();
    let a = engine.compute_grid(&MapRect::new(0.0, 0.0, 1000.0, 3000.0)).unwrap();
    let b = engine.compute_grid(&MapRect::new(500.0, 250.0, 1000.0, 3000.0)).unwrap();

    assert_eq!(a.len(), b.len());
    for (ca, cb) in a.iter().zip(&b) {
        assert_eq!(ca.width, cb.width);
        assert_eq!(ca.height, cb.height);
        assert!((cb.x - ca.x - 500.0).abs() < 1e-9);
        assert!((cb.y - ca.y - 250.0).abs() < 1e-9);
    }
}

#[test]
fn test_example_nine_music_posts() {
    let engine = ClusterEngine::default();
    let bucket: Vec<Post> = (0..9)
        .map(|i| Post::new(Topic::Music, MapPoint::new(100.0 + i as f64, 100.0)))
        .collect();
    let cell = MapRect::new(0.0, 0.0, 5000.0, 7000.0);

    let result = engine.reduce(&bucket, engine.slot_positions(&cell));

    assert_eq!(result.len(), 7);
    assert!(result.iter().all(|p| p.topic == Topic::Music && p.cluster_count == 1));
}

#[test]
fn test_example_three_topics() {
    let engine = ClusterEngine::default();
    let cell = MapRect::new(0.0, 0.0, 5000.0, 7000.0);
    let slots = engine.slot_positions(&cell);

    let mut bucket = Vec::new();
    for (topic, n) in [(Topic::Music, 4), (Topic::Food, 3), (Topic::Art, 2)] {
        for i in 0..n {
            bucket.push(Post::new(topic, MapPoint::new(1000.0 + i as f64 * 10.0, 2000.0)));
        }
    }

    let result = engine.reduce(&bucket, slots);

    let counts: Vec<usize> = result.iter().map(|p| p.cluster_count).collect();
    assert_eq!(counts, vec![4, 3, 2]);
    for marker in &result {
        assert!(slots.contains(&marker.location));
    }
    assert_ne!(result[0].location, result[1].location);
    assert_ne!(result[0].location, result[2].location);
    assert_ne!(result[1].location, result[2].location);
    // The top-left slot has the lowest score, so the smallest group gets it
    assert_eq!(result[2].location, slots[0]);
}

#[test]
fn test_all_posts_inside_one_cell() {
    let engine = ClusterEngine::default();
    let viewport = reference_viewport();
    let cells = engine.compute_grid(&viewport).unwrap();
    let target = cells[7];

    let mut posts = Vec::new();
    for (i, topic) in [Topic::Sad, Topic::Sad, Topic::Sad, Topic::Car, Topic::Car]
        .iter()
        .cycle()
        .take(10)
        .enumerate()
    {
        posts.push(Post::new(
            *topic,
            MapPoint::new(target.x + 10.0 + i as f64, target.y + 10.0),
        ));
    }

    let markers = engine.run(&viewport, &posts).unwrap();

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].topic, Topic::Sad);
    assert_eq!(markers[0].cluster_count, 6);
    assert_eq!(markers[1].topic, Topic::Car);
    assert_eq!(markers[1].cluster_count, 4);
}

#[test]
fn test_markers_follow_cell_order() {
    let engine = ClusterEngine::default();
    let viewport = reference_viewport();
    let cells = engine.compute_grid(&viewport).unwrap();

    let late = Post::new(Topic::Work, cells[12].mid_point());
    let early = Post::new(Topic::Art, cells[2].mid_point());

    let markers = engine.run(&viewport, &[late, early]).unwrap();

    assert_eq!(markers, vec![early, late]);
}

#[test]
fn test_cluster_counts_are_conserved() {
    let engine = ClusterEngine::default();
    let viewport = reference_viewport();

    for seed in 0..20 {
        let posts = scattered_posts(seed, 400, &viewport);
        let cells = engine.compute_grid(&viewport).unwrap();
        let buckets = assign(&posts, &cells);

        let mut expected = 0;
        for bucket in buckets.values() {
            let groups = reduce::group_by_topic(bucket);
            expected += match (bucket.len() > 7, groups.len()) {
                (false, _) => bucket.len(),
                (true, 1) => 7,
                (true, _) => groups.iter().take(3).map(|g| g.count).sum(),
            };
        }

        let markers = engine.run(&viewport, &posts).unwrap();
        let total: usize = markers.iter().map(|m| m.cluster_count).sum();
        assert_eq!(total, expected, "seed {}", seed);
    }
}

#[test]
fn test_reduced_buckets_emit_at_most_three_markers() {
    let engine = ClusterEngine::default();
    let viewport = reference_viewport();
    let posts = scattered_posts(7, 2000, &viewport);
    let cells = engine.compute_grid(&viewport).unwrap();

    for (index, bucket) in assign(&posts, &cells) {
        let markers = engine.reduce(&bucket, engine.slot_positions(&cells[index]));
        if bucket.len() <= 7 {
            assert_eq!(markers, bucket);
        } else if reduce::group_by_topic(&bucket).len() == 1 {
            assert_eq!(markers.len(), 7);
        } else {
            assert!(markers.len() <= 3);
            let slots = engine.slot_positions(&cells[index]);
            assert!(markers.iter().all(|m| slots.contains(&m.location)));
        }
    }
}

#[test]
fn test_dropped_posts_are_reported() {
    let engine = ClusterEngine::default();
    let viewport = reference_viewport();
    let inside = Post::new(Topic::Food, viewport.mid_point());
    let far = Post::new(Topic::Food, MapPoint::new(-1e7, -1e7));

    let pass = engine.run_pass(&viewport, &[inside, far]).unwrap();

    assert_eq!(pass.assigned_posts, 1);
    assert_eq!(pass.dropped_posts, 1);
    assert_eq!(pass.markers, vec![inside]);
}

#[test]
fn test_custom_pass_through_limit() {
    let engine = ClusterEngine::new(ClusterParams {
        pass_through_limit: 2,
        ..ClusterParams::default()
    })
    .unwrap();
    let viewport = reference_viewport();
    let center = viewport.mid_point();
    let posts = vec![
        Post::new(Topic::Music, center),
        Post::new(Topic::Music, center),
        Post::new(Topic::Food, center),
    ];

    let markers = engine.run(&viewport, &posts).unwrap();

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].cluster_count, 2);
    assert_eq!(markers[1].cluster_count, 1);
}
