use bevy::prelude::*;

/// Pull vector from the released bird back toward the anchor.
/// The caller scales it into an engine impulse.
#[inline]
pub fn launch_impulse(anchor: Vec2, release: Vec2) -> Vec2 {
    anchor - release
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_from_release_to_anchor() {
        let v = launch_impulse(Vec2::new(100.0, 100.0), Vec2::new(40.0, 70.0));
        assert_eq!(v, Vec2::new(60.0, 30.0));
    }

    #[test]
    fn release_at_anchor_is_zero() {
        let a = Vec2::new(12.0, -3.0);
        assert_eq!(launch_impulse(a, a), Vec2::ZERO);
    }
}
