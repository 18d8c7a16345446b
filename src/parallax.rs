//! Parallax transform for the hero background.

/// Transform applied to the hero backdrop at a given scroll depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTransform {
    pub translate_y: f64,
    pub scale: f64,
}

/// Compute the backdrop transform for a scroll sample.
///
/// Returns `None` once the scroll position has left the hero; the last
/// applied transform is then left in place (the backdrop is off screen
/// anyway).
pub fn hero_transform(
    scroll_y: f64,
    hero_height: f64,
    rate: f64,
    scale_rate: f64,
) -> Option<ParallaxTransform> {
    if scroll_y >= hero_height {
        return None;
    }
    Some(ParallaxTransform {
        translate_y: scroll_y * rate,
        scale: 1.0 + scroll_y * scale_rate,
    })
}
