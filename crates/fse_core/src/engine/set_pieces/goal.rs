use super::{kick_off, End};
use crate::engine::rng::SimContext;
use crate::error::Result;
use crate::models::{Intent, Match, Side};

/// Credits a goal to `side` and restarts with the conceding team kicking off.
/// The last touch decides the scorer; a defender's touch is an own goal.
pub fn score_goal(m: &mut Match, ctx: &mut SimContext, side: Side, end: End) -> Result<()> {
    m.stats_mut(side).goals += 1;
    let team = m.team(side).name.clone();
    let scorer = m.ball.last_touch.player_id.and_then(|id| m.locate(id));
    let line = match scorer {
        Some(r) if r.side == side => {
            let player = m.player_mut(r);
            player.stats.goals += 1;
            format!("Goal! {} scores for {}", player.name, team)
        }
        Some(r) => format!("Own goal by {}, {} score", m.player(r).name, team),
        None => format!("Goal for {}", team),
    };
    log::debug!("{} at the {:?} end", line, end);
    m.log(line);

    let conceding = side.other();
    kick_off(m, ctx, conceding)?;
    m.team_mut(conceding).intent = Intent::Attack;
    m.team_mut(side).intent = Intent::Defend;
    Ok(())
}
