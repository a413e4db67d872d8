//! Collision classification for one ball step
//!
//! The ball is tested at its candidate position only. Wall contact is judged
//! independently and only flips the vertical velocity for the following tick;
//! the horizontal outcome is exactly one of paddle hit, miss or plain move.

use glam::Vec2;

use super::state::{Ball, Paddle, Player};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Horizontal outcome of a step, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Ball touched this player's paddle: flip vx, keep position
    PaddleHit(Player),
    /// Ball left the field; `scorer` takes the round
    Miss { scorer: Player },
    /// Nothing in the way: commit the candidate position
    Move,
}

/// Result of classifying a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallStep {
    /// Candidate position `pos + vel`
    pub next: Vec2,
    /// Candidate is beyond the top or bottom wall
    pub wall_bounce: bool,
    pub kind: StepKind,
}

/// Classify the ball's next step against walls, paddles and goal lines
pub fn classify_step(ball: &Ball, left: &Paddle, right: &Paddle) -> BallStep {
    let next = ball.pos + ball.vel;

    let wall_bounce = next.y < ball.radius || next.y > FIELD_HEIGHT - ball.radius;

    let kind = if next.x < left.width && left.spans(next.y) {
        StepKind::PaddleHit(Player::Player1)
    } else if next.x > FIELD_WIDTH - right.width && right.spans(next.y) {
        StepKind::PaddleHit(Player::Player2)
    } else if next.x < 0.0 {
        StepKind::Miss {
            scorer: Player::Player2,
        }
    } else if next.x > FIELD_WIDTH {
        StepKind::Miss {
            scorer: Player::Player1,
        }
    } else {
        StepKind::Move
    };

    BallStep {
        next,
        wall_bounce,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            ..Default::default()
        }
    }

    fn paddle_at(y: f32) -> Paddle {
        Paddle {
            y,
            ..Default::default()
        }
    }

    #[test]
    fn test_open_field_moves() {
        let step = classify_step(
            &ball_at(300.0, 200.0, 5.0, 5.0),
            &Paddle::default(),
            &Paddle::default(),
        );
        assert_eq!(step.kind, StepKind::Move);
        assert!(!step.wall_bounce);
        assert_eq!(step.next, Vec2::new(305.0, 205.0));
    }

    #[test]
    fn test_top_and_bottom_walls() {
        let top = classify_step(
            &ball_at(300.0, 12.0, 5.0, -5.0),
            &Paddle::default(),
            &Paddle::default(),
        );
        assert!(top.wall_bounce);
        assert_eq!(top.kind, StepKind::Move);

        let bottom = classify_step(
            &ball_at(300.0, 388.0, 5.0, 5.0),
            &Paddle::default(),
            &Paddle::default(),
        );
        assert!(bottom.wall_bounce);

        // Exactly on the limit is not a bounce
        let edge = classify_step(
            &ball_at(300.0, 15.0, 5.0, -5.0),
            &Paddle::default(),
            &Paddle::default(),
        );
        assert!(!edge.wall_bounce);
    }

    #[test]
    fn test_left_paddle_hit() {
        let step = classify_step(
            &ball_at(12.0, 150.0, -5.0, 5.0),
            &paddle_at(100.0),
            &Paddle::default(),
        );
        assert_eq!(step.kind, StepKind::PaddleHit(Player::Player1));
    }

    #[test]
    fn test_right_paddle_hit() {
        let step = classify_step(
            &ball_at(788.0, 150.0, 5.0, 5.0),
            &Paddle::default(),
            &paddle_at(100.0),
        );
        assert_eq!(step.kind, StepKind::PaddleHit(Player::Player2));
    }

    #[test]
    fn test_paddle_edge_does_not_count() {
        // Candidate y lands exactly on the paddle's top edge
        let step = classify_step(
            &ball_at(12.0, 95.0, -5.0, 5.0),
            &paddle_at(100.0),
            &Paddle::default(),
        );
        assert_eq!(step.kind, StepKind::Move);
    }

    #[test]
    fn test_misses() {
        let left = classify_step(
            &ball_at(3.0, 50.0, -5.0, 5.0),
            &paddle_at(200.0),
            &Paddle::default(),
        );
        assert_eq!(
            left.kind,
            StepKind::Miss {
                scorer: Player::Player2
            }
        );

        let right = classify_step(
            &ball_at(797.0, 50.0, 5.0, 5.0),
            &Paddle::default(),
            &paddle_at(200.0),
        );
        assert_eq!(
            right.kind,
            StepKind::Miss {
                scorer: Player::Player1
            }
        );
    }

    #[test]
    fn test_paddle_hit_wins_over_wall() {
        // Paddle pinned to the top and ball grazing the top wall at the same time
        let step = classify_step(
            &ball_at(12.0, 12.0, -5.0, -5.0),
            &paddle_at(0.0),
            &Paddle::default(),
        );
        assert!(step.wall_bounce);
        assert_eq!(step.kind, StepKind::PaddleHit(Player::Player1));
    }
}
