//! Grounding and jump rules, expressed in world space (y up).

/// Player is standing when physics holds it on the floor or it sits at/below the
/// ground line (within `tolerance`).
pub fn can_jump(on_ground: bool, y: f32, ground_y: f32, tolerance: f32) -> bool {
    on_ground || y <= ground_y + tolerance
}

/// Landing check: not moving upward and back at the ground line.
pub fn has_landed(vy: f32, y: f32, ground_y: f32, tolerance: f32) -> bool {
    vy <= 0.0 && y <= ground_y + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airborne_player_cannot_jump() {
        assert!(!can_jump(false, 50.0, 0.0, 1.0));
        assert!(can_jump(false, 0.5, 0.0, 1.0));
        assert!(can_jump(true, 50.0, 0.0, 1.0));
    }

    #[test]
    fn rising_player_has_not_landed() {
        assert!(!has_landed(10.0, -2.0, 0.0, 1.0));
        assert!(has_landed(-10.0, -2.0, 0.0, 1.0));
        assert!(has_landed(0.0, 1.0, 0.0, 1.0));
        assert!(!has_landed(-10.0, 5.0, 0.0, 1.0));
    }
}
