//! Bucket assignment and reduction
//!
//! Posts are bucketed into the first cell that contains them. Dense buckets
//! are folded into at most three synthetic markers, one per dominant topic.

use crate::constants::cluster::SLOT_COUNT;
use crate::geo::{MapPoint, MapRect};
use crate::post::{Post, Topic};
use std::collections::BTreeMap;

/// Posts of one topic within a bucket
#[derive(Debug, Clone)]
pub struct TopicGroup {
    pub topic: Topic,
    /// Number of posts in the group
    pub count: usize,
    /// Mean projected position of the group's posts
    pub centroid: MapPoint,
}

/// Bucket posts by the first cell (in grid order) that contains them
///
/// Posts outside every cell are left out. Buckets keep the input order of
/// their posts; keys are cell indices, so iteration follows grid order.
pub fn assign(posts: &[Post], cells: &[MapRect]) -> BTreeMap<usize, Vec<Post>> {
    let mut buckets: BTreeMap<usize, Vec<Post>> = BTreeMap::new();
    for post in posts {
        if let Some(index) = cells.iter().position(|cell| cell.contains(post.location)) {
            buckets.entry(index).or_default().push(*post);
        }
    }
    buckets
}

/// Group a bucket by topic, largest group first
///
/// Groups with equal counts keep the order in which their topic first
/// appears in the bucket.
pub fn group_by_topic(bucket: &[Post]) -> Vec<TopicGroup> {
    let mut members: Vec<(Topic, Vec<MapPoint>)> = Vec::new();
    for post in bucket {
        match members.iter_mut().find(|(topic, _)| *topic == post.topic) {
            Some((_, points)) => points.push(post.location),
            None => members.push((post.topic, vec![post.location])),
        }
    }

    let mut groups: Vec<TopicGroup> = members
        .into_iter()
        .map(|(topic, points)| {
            let n = points.len() as f64;
            let centroid = points.iter().fold(MapPoint::default(), |mut acc, p| {
                acc.x += p.x / n;
                acc.y += p.y / n;
                acc
            });
            TopicGroup {
                topic,
                count: points.len(),
                centroid,
            }
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

/// Take the remaining slot with the highest placement score for a centroid
///
/// The score is `(slot.x - c.x) + (slot.y - c.y)`; the earliest slot wins
/// ties.
fn take_slot(remaining: &mut Vec<MapPoint>, centroid: MapPoint) -> Option<MapPoint> {
    let mut best: Option<(usize, f64)> = None;
    for (index, slot) in remaining.iter().enumerate() {
        let score = slot.x - centroid.x + slot.y - centroid.y;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| remaining.remove(index))
}

/// Reduce one cell's bucket to the markers to display
///
/// Buckets of at most `pass_through_limit` posts come back unchanged. A
/// larger single-topic bucket is truncated to its first
/// `pass_through_limit` posts. Otherwise the top three topic groups become
/// synthetic markers, in rank order, each placed on its own slot.
pub fn reduce(
    bucket: &[Post],
    slots: [MapPoint; SLOT_COUNT],
    pass_through_limit: usize,
) -> Vec<Post> {
    if bucket.len() <= pass_through_limit {
        return bucket.to_vec();
    }

    let groups = group_by_topic(bucket);
    if groups.len() == 1 {
        return bucket.iter().take(pass_through_limit).copied().collect();
    }

    let mut remaining = slots.to_vec();
    groups
        .iter()
        .take(SLOT_COUNT)
        .filter_map(|group| {
            take_slot(&mut remaining, group.centroid)
                .map(|slot| Post::cluster(group.topic, slot, group.count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 7;

    fn slots() -> [MapPoint; SLOT_COUNT] {
        [
            MapPoint::new(10.0, 10.0),
            MapPoint::new(90.0, 20.0),
            MapPoint::new(15.0, 80.0),
        ]
    }

    fn posts(topic: Topic, n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post::new(topic, MapPoint::new(i as f64, i as f64 * 2.0)))
            .collect()
    }

    #[test]
    fn test_assign_first_match() {
        let cells = vec![
            MapRect::new(0.0, 0.0, 10.0, 10.0),
            MapRect::new(10.0, 0.0, 10.0, 10.0),
        ];
        // x = 10 lies on the shared edge and goes to the first cell
        let edge = Post::new(Topic::Car, MapPoint::new(10.0, 5.0));
        let right = Post::new(Topic::Car, MapPoint::new(15.0, 5.0));
        let outside = Post::new(Topic::Car, MapPoint::new(50.0, 5.0));

        let buckets = assign(&[edge, right, outside], &cells);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&0], vec![edge]);
        assert_eq!(buckets[&1], vec![right]);
    }

    #[test]
    fn test_assign_keeps_input_order() {
        let cells = vec![MapRect::new(0.0, 0.0, 100.0, 100.0)];
        let input = posts(Topic::Sad, 5);
        let buckets = assign(&input, &cells);
        assert_eq!(buckets[&0], input);
    }

    #[test]
    fn test_group_by_topic_ranks_and_centroids() {
        let mut bucket = vec![Post::new(Topic::Art, MapPoint::new(0.0, 0.0))];
        bucket.push(Post::new(Topic::Food, MapPoint::new(2.0, 4.0)));
        bucket.push(Post::new(Topic::Food, MapPoint::new(4.0, 8.0)));

        let groups = group_by_topic(&bucket);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].topic, Topic::Food);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].centroid, MapPoint::new(3.0, 6.0));
        assert_eq!(groups[1].topic, Topic::Art);
    }

    #[test]
    fn test_group_ties_keep_first_appearance() {
        let mut bucket = posts(Topic::Work, 2);
        bucket.extend(posts(Topic::Music, 2));
        let groups = group_by_topic(&bucket);
        assert_eq!(groups[0].topic, Topic::Work);
        assert_eq!(groups[1].topic, Topic::Music);
    }

    #[test]
    fn test_small_bucket_passes_through() {
        let mut bucket = posts(Topic::Music, 4);
        bucket.extend(posts(Topic::Food, 3));

        assert_eq!(reduce(&bucket, slots(), LIMIT), bucket);
    }

    #[test]
    fn test_single_topic_is_truncated() {
        let bucket = posts(Topic::Music, 9);
        let result = reduce(&bucket, slots(), LIMIT);

        assert_eq!(result, bucket[..7].to_vec());
        assert!(result.iter().all(|p| p.cluster_count == 1));
    }

    #[test]
    fn test_mixed_bucket_becomes_markers() {
        let mut bucket = posts(Topic::Music, 4);
        bucket.extend(posts(Topic::Food, 3));
        bucket.extend(posts(Topic::Art, 2));

        let result = reduce(&bucket, slots(), LIMIT);

        let counts: Vec<usize> = result.iter().map(|p| p.cluster_count).collect();
        assert_eq!(counts, vec![4, 3, 2]);
        let topics: Vec<Topic> = result.iter().map(|p| p.topic).collect();
        assert_eq!(topics, vec![Topic::Music, Topic::Food, Topic::Art]);

        // Scores only differ by slot.x + slot.y: (90, 20) > (15, 80) > (10, 10)
        assert_eq!(result[0].location, MapPoint::new(90.0, 20.0));
        assert_eq!(result[1].location, MapPoint::new(15.0, 80.0));
        assert_eq!(result[2].location, MapPoint::new(10.0, 10.0));
    }

    #[test]
    fn test_only_top_three_groups_are_kept() {
        let mut bucket = posts(Topic::Music, 5);
        bucket.extend(posts(Topic::Food, 4));
        bucket.extend(posts(Topic::Art, 3));
        bucket.extend(posts(Topic::Sad, 1));

        let result = reduce(&bucket, slots(), LIMIT);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|p| p.topic != Topic::Sad));
        assert_eq!(result.iter().map(|p| p.cluster_count).sum::<usize>(), 12);
    }

    #[test]
    fn test_two_topics_use_two_slots() {
        let mut bucket = posts(Topic::Angry, 5);
        bucket.extend(posts(Topic::Car, 3));

        let result = reduce(&bucket, slots(), LIMIT);

        assert_eq!(result.len(), 2);
        assert_ne!(result[0].location, result[1].location);
        assert_eq!(result.iter().map(|p| p.cluster_count).sum::<usize>(), 8);
    }

    #[test]
    fn test_take_slot_tie_prefers_earliest() {
        let mut remaining = vec![MapPoint::new(1.0, 2.0), MapPoint::new(2.0, 1.0)];
        let slot = take_slot(&mut remaining, MapPoint::new(0.0, 0.0));
        assert_eq!(slot, Some(MapPoint::new(1.0, 2.0)));
        assert_eq!(remaining, vec![MapPoint::new(2.0, 1.0)]);
    }
}
