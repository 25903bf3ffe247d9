//! Team intents and the positions they imply.

use super::frame::Frame;
use super::physics_constants::intent;
use crate::models::{Coord, Intent, Match, PitchSize, Player, Side};

/// Where `player` wants to be: its origin pushed up when attacking and pulled
/// across towards the ball, more so when defending.
pub fn intent_position(pitch: &PitchSize, frame: &Frame, player: &Player, team_intent: Intent, ball_x: f64) -> Coord {
    let origin = frame.to_frame(player.origin_pos);
    let keeper = player.is_goalkeeper();
    let advance = match team_intent {
        Intent::Attack if keeper => pitch.height * intent::KEEPER_ADVANCE,
        Intent::Attack => pitch.height * intent::ATTACK_ADVANCE,
        Intent::Defend | Intent::None => 0.0,
    };
    let pull = match team_intent {
        _ if keeper => intent::NEUTRAL_PULL,
        Intent::Attack => intent::ATTACK_PULL,
        Intent::Defend => intent::DEFEND_PULL,
        Intent::None => intent::NEUTRAL_PULL,
    };
    let x = origin.x + (ball_x - origin.x) * pull;
    pitch.clamp(frame.to_pitch(Coord::new(x, origin.y + advance)))
}

/// Intents follow possession; a loose ball leaves them as they were. Every active
/// player's `intent_pos` is then refreshed.
pub fn update_intents(m: &mut Match) {
    if m.ball.with_player {
        if let Some(side) = m.ball.with_team.and_then(|id| m.side_of_team(id)) {
            m.team_mut(side).intent = Intent::Attack;
            m.team_mut(side.other()).intent = Intent::Defend;
        }
    }

    let pitch = m.pitch_size;
    let ball_x = m.ball.position.x;
    for side in Side::BOTH {
        let frame = Frame::for_side(m, side);
        let team = m.team_mut(side);
        let team_intent = team.intent;
        for p in team.players.iter_mut().filter(|p| p.current_pos.is_active()) {
            p.intent_pos = intent_position(&pitch, &frame, p, team_intent, ball_x);
        }
    }
}
