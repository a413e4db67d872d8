//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one step and settles
//! round results.

use super::collision::{StepKind, classify_step};
use super::state::{GameEvent, GameState, MatchPhase, Player, Winner};

/// Advance the game state by one fixed step.
///
/// Does nothing unless the match is running. Wall and paddle bounces take
/// effect on the following tick: a wall bounce still commits this tick's
/// move with the old vertical velocity, and a paddle hit commits nothing.
pub fn tick(state: &mut GameState) {
    if !state.match_state.is_running() {
        return;
    }

    let step = classify_step(&state.ball, &state.left, &state.right);

    if step.wall_bounce {
        state.ball.vel.y = -state.ball.vel.y;
        state.push_event(GameEvent::WallBounce);
        log::trace!("Wall bounce at y={}", step.next.y);
    }

    match step.kind {
        StepKind::PaddleHit(player) => {
            state.ball.vel.x = -state.ball.vel.x;
            state.push_event(GameEvent::PaddleHit(player));
            log::debug!("{} returned the ball", player.label());
        }
        StepKind::Miss { scorer } => end_round(state, scorer),
        StepKind::Move => state.ball.pos = step.next,
    }
}

/// Settle a finished round in favour of `winner`.
///
/// Round count and score are updated before the match-end check reads
/// them, so the final winner always reflects the last round.
pub fn end_round(state: &mut GameState, winner: Player) {
    state.match_state.phase = MatchPhase::Stopped;
    state.match_state.rounds_played += 1;
    state.match_state.award(winner);

    let player1_score = state.match_state.player1_score;
    let player2_score = state.match_state.player2_score;
    state.push_event(GameEvent::RoundWon {
        winner,
        player1_score,
        player2_score,
    });
    log::info!(
        "Round {} to {} ({} - {})",
        state.match_state.rounds_played,
        winner.label(),
        player1_score,
        player2_score
    );

    if state.match_state.rounds_played >= state.rules.rounds_per_match {
        let result = Winner::from_scores(player1_score, player2_score);
        state.match_state.phase = MatchPhase::GameOver(result);
        state.push_event(GameEvent::MatchOver(result));
        log::info!("Game over: {}", result.banner());
    } else {
        state.reset_positions();
        state.match_state.phase = MatchPhase::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Ball, Paddle, Rules};
    use glam::Vec2;

    fn running_state() -> GameState {
        let mut state = GameState::default();
        state.match_state.phase = MatchPhase::Running;
        state
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut state = running_state();
        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(305.0, 205.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_tick_ignored_when_not_running() {
        let mut state = GameState::default();
        tick(&mut state);
        assert_eq!(state.ball, Ball::default());

        state.match_state.phase = MatchPhase::GameOver(Winner::Player1);
        tick(&mut state);
        assert_eq!(state.ball, Ball::default());
    }

    #[test]
    fn test_wall_bounce_is_one_tick_late() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(300.0, 12.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        // Bounce tick: position still uses the old vy, vy flips for next time
        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(305.0, 7.0));
        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.events, vec![GameEvent::WallBounce]);

        // Following tick moves with the inverted vy
        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(310.0, 12.0));
        assert_eq!(state.ball.vel.y, 5.0);
    }

    #[test]
    fn test_ball_inside_top_band_moving_away_does_not_bounce() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(300.0, BALL_RADIUS - 1.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(305.0, BALL_RADIUS + 4.0));
        assert_eq!(state.ball.vel.y, 5.0);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(300.0, 388.0);
        tick(&mut state);
        assert_eq!(state.ball.pos.y, 393.0);
        assert_eq!(state.ball.vel.y, -5.0);
        tick(&mut state);
        assert_eq!(state.ball.pos.y, 388.0);
    }

    #[test]
    fn test_left_paddle_hit_freezes_ball() {
        let mut state = running_state();
        state.left.y = 100.0;
        state.ball.pos = Vec2::new(12.0, 150.0);
        state.ball.vel = Vec2::new(-5.0, 5.0);

        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(12.0, 150.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.events, vec![GameEvent::PaddleHit(Player::Player1)]);

        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(17.0, 155.0));
    }

    #[test]
    fn test_right_paddle_hit_freezes_ball() {
        let mut state = running_state();
        state.right.y = 100.0;
        state.ball.pos = Vec2::new(788.0, 150.0);
        state.ball.vel = Vec2::new(5.0, -5.0);

        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(788.0, 150.0));
        assert_eq!(state.ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_paddle_hit_with_wall_flips_both() {
        let mut state = running_state();
        state.left.y = 0.0;
        state.ball.pos = Vec2::new(12.0, 12.0);
        state.ball.vel = Vec2::new(-5.0, -5.0);

        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(12.0, 12.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(
            state.events,
            vec![GameEvent::WallBounce, GameEvent::PaddleHit(Player::Player1)]
        );
    }

    #[test]
    fn test_left_miss_scores_for_player2() {
        let mut state = running_state();
        state.left.y = 300.0;
        state.ball.pos = Vec2::new(3.0, 50.0);
        state.ball.vel = Vec2::new(-5.0, 5.0);

        tick(&mut state);
        assert_eq!(state.match_state.player2_score, 1);
        assert_eq!(state.match_state.player1_score, 0);
        assert_eq!(state.match_state.rounds_played, 1);
        // Round auto-continues from serve positions
        assert!(state.match_state.is_running());
        assert_eq!(state.ball, Ball::default());
        assert_eq!(state.left, Paddle::default());
    }

    #[test]
    fn test_right_miss_scores_for_player1() {
        let mut state = running_state();
        state.right.y = 300.0;
        state.ball.pos = Vec2::new(797.0, 50.0);

        tick(&mut state);
        assert_eq!(state.match_state.player1_score, 1);
        assert_eq!(
            state.events,
            vec![GameEvent::RoundWon {
                winner: Player::Player1,
                player1_score: 1,
                player2_score: 0,
            }]
        );
    }

    #[test]
    fn test_ball_reaches_goal_line_from_serve() {
        // Nobody moves: the serve eventually beats one of the paddles
        let mut state = running_state();
        let mut ticks = 0;
        while state.match_state.rounds_played == 0 {
            tick(&mut state);
            ticks += 1;
            assert!(ticks < 10_000, "round never ended");
        }
        assert_eq!(
            state.match_state.player1_score + state.match_state.player2_score,
            1
        );
    }

    #[test]
    fn test_third_round_ends_match() {
        let mut state = running_state();
        end_round(&mut state, Player::Player1);
        end_round(&mut state, Player::Player2);
        assert!(state.match_state.is_running());
        assert_eq!(state.match_state.winner(), None);

        end_round(&mut state, Player::Player1);
        assert!(state.match_state.is_game_over());
        assert!(!state.match_state.is_running());
        assert_eq!(state.match_state.rounds_played, 3);
        assert_eq!(state.match_state.winner(), Some(Winner::Player1));
    }

    #[test]
    fn test_winner_for_every_best_of_three_result() {
        use crate::sim::state::Player::{Player1 as P1, Player2 as P2};
        let cases = [
            ([P1, P1, P1], Winner::Player1),
            ([P2, P2, P2], Winner::Player2),
            ([P1, P2, P1], Winner::Player1),
            ([P2, P1, P2], Winner::Player2),
        ];
        for (rounds, expected) in cases {
            let mut state = running_state();
            for player in rounds {
                end_round(&mut state, player);
            }
            assert_eq!(state.match_state.winner(), Some(expected), "{rounds:?}");
        }
    }

    #[test]
    fn test_winner_uses_final_round_score() {
        // 1-1 going into the last round: the deciding point must be counted
        let mut state = running_state();
        end_round(&mut state, Player::Player1);
        end_round(&mut state, Player::Player2);
        end_round(&mut state, Player::Player2);
        assert_eq!(state.match_state.player2_score, 2);
        assert_eq!(state.match_state.winner(), Some(Winner::Player2));
    }

    #[test]
    fn test_tie_with_even_round_count() {
        let mut state = GameState::new(Rules {
            rounds_per_match: 2,
            ..Default::default()
        });
        state.match_state.phase = MatchPhase::Running;
        end_round(&mut state, Player::Player1);
        end_round(&mut state, Player::Player2);
        assert_eq!(state.match_state.winner(), Some(Winner::Tie));
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::MatchOver(Winner::Tie))
        );
    }

    #[test]
    fn test_game_over_keeps_final_positions() {
        let mut state = GameState::new(Rules {
            rounds_per_match: 1,
            ..Default::default()
        });
        state.match_state.phase = MatchPhase::Running;
        state.right.y = 300.0;
        state.ball.pos = Vec2::new(797.0, 50.0);

        tick(&mut state);
        assert!(state.match_state.is_game_over());
        assert_eq!(state.ball.pos, Vec2::new(797.0, 50.0));

        // Further ticks are ignored
        tick(&mut state);
        assert_eq!(state.match_state.rounds_played, 1);
    }
}
