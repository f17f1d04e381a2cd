//! Score line, title and win banner

use glam::IVec2;

use crate::sim::{Color, GameOutcome, Player, Scores};

use super::surface::Surface;

const TITLE_POS: IVec2 = IVec2::new(50, 0);
const BANNER_POS: IVec2 = IVec2::new(20, 60);

/// Label and digit positions for each player on the score line
fn score_layout(player: Player) -> (IVec2, IVec2, &'static str, Color) {
    match player {
        Player::One => (IVec2::new(3, 152), IVec2::new(52, 152), "Player1:", Color::RED),
        Player::Two => (IVec2::new(72, 152), IVec2::new(120, 152), "Player2:", Color::GREEN),
    }
}

/// Banner text for a finished match
pub fn banner_text(outcome: GameOutcome) -> Option<String> {
    outcome
        .winner()
        .map(|p| format!("Player {} Wins!!", p.number()))
}

/// Draw the title and both scores
pub fn draw_scoreboard(scores: &Scores, background: Color, surface: &mut impl Surface) {
    surface.draw_text(TITLE_POS, "PONG", Color::BLUE, background);
    for player in [Player::One, Player::Two] {
        let (label_pos, digit_pos, label, color) = score_layout(player);
        surface.draw_text(label_pos, label, color, background);
        let mut buf = [0u8; 4];
        surface.draw_text(
            digit_pos,
            scores.digit(player).encode_utf8(&mut buf),
            color,
            background,
        );
    }
}

/// Draw the win banner once the match is over
pub fn draw_banner(outcome: GameOutcome, background: Color, surface: &mut impl Surface) -> bool {
    match banner_text(outcome) {
        Some(text) => {
            surface.draw_text(BANNER_POS, &text, Color::GREEN, background);
            true
        }
        None => false,
    }
}
