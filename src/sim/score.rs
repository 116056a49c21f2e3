//! Scoring

use super::body::Body;
use super::obstacle::Obstacle;

/// Mark obstacles whose left edge the body has passed
///
/// Returns how many were newly passed. Obstacles only move left and the body
/// never moves horizontally, so each obstacle is counted at most once.
pub fn award(body: &Body, obstacles: &mut [Obstacle]) -> u32 {
    let mut scored = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.x < body.x {
            obstacle.passed = true;
            scored += 1;
        }
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_once_per_obstacle() {
        let body = Body {
            x: 100.0,
            y: 200.0,
            velocity: 0.0,
        };
        let mut obstacles = vec![
            Obstacle { x: 99.0, gap_top: 100.0, passed: false },
            Obstacle { x: 100.0, gap_top: 100.0, passed: false },
            Obstacle { x: 50.0, gap_top: 100.0, passed: true },
        ];
        assert_eq!(award(&body, &mut obstacles), 1);
        assert!(obstacles[0].passed);
        assert!(!obstacles[1].passed);
        assert_eq!(award(&body, &mut obstacles), 0);
    }
}
