//! Demo post generation
//!
//! Tops up a viewport with random posts so the map has something to
//! cluster. Density follows the viewport width: one post per `spacing`
//! projected units. This is caller-side data, the engine never calls it.

use crate::constants::demo::MAX_POSTS;
use crate::error::{Error, Result};
use crate::geo::{MapPoint, Viewport};
use crate::post::{Post, Topic};
use rand::Rng;
use tracing::debug;

/// How many posts to add so the viewport reaches its target density
///
/// Returns 0 when the viewport already holds enough posts. Targets beyond
/// `usize::MAX` saturate.
pub fn needed_count(viewport: &Viewport, posts: &[Post], spacing: f64) -> usize {
    let target = (viewport.width / spacing).floor() as usize;
    let present = posts
        .iter()
        .filter(|p| viewport.contains(p.location))
        .count();
    target.saturating_sub(present)
}

/// Generate random posts inside a viewport
///
/// Topics and positions are uniform. Pass a seeded RNG for reproducible
/// output.
pub fn random_posts<R: Rng + ?Sized>(viewport: &Viewport, count: usize, rng: &mut R) -> Vec<Post> {
    (0..count)
        .map(|_| {
            let topic = Topic::ALL[rng.gen_range(0..Topic::ALL.len())];
            let location = MapPoint::new(
                viewport.min_x() + viewport.width * rng.gen::<f64>(),
                viewport.min_y() + viewport.height * rng.gen::<f64>(),
            );
            Post::new(topic, location)
        })
        .collect()
}

/// Generate the demo posts a viewport is missing
///
/// # Arguments
/// * `viewport` - Visible map rectangle
/// * `existing` - Posts already known
/// * `spacing` - Projected units of viewport width per post
/// * `rng` - Random source
///
/// Fails with `InvalidParams` when more than `MAX_POSTS` posts would be
/// needed.
pub fn generate_demo_posts<R: Rng + ?Sized>(
    viewport: &Viewport,
    existing: &[Post],
    spacing: f64,
    rng: &mut R,
) -> Result<Vec<Post>> {
    viewport.validate()?;
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::InvalidParams(format!(
            "Demo spacing must be positive, got {}",
            spacing
        )));
    }

    let count = needed_count(viewport, existing, spacing);
    debug!(
        "Demo posts - existing={}, needed={}, spacing={}",
        existing.len(),
        count,
        spacing
    );
    if count > MAX_POSTS {
        return Err(Error::InvalidParams(format!(
            "Viewport needs {} demo posts, at most {} can be generated at spacing {}",
            count, MAX_POSTS, spacing
        )));
    }
    Ok(random_posts(viewport, count, rng))
}
