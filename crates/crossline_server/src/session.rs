//! Seated players and the games they sit in.

use crate::connection::{ConnectionRef, deliver};
use crate::protocol::{PlayerId, SeatNames, ServerMessage};
use crossline_tictactoe::{Game, Mark};
use tracing::{debug, instrument};

/// Unique identifier for a game.
pub type GameId = u64;

/// A player who has asked to join a game.
#[derive(Debug, Clone)]
pub struct Player {
    /// Player's unique ID.
    pub id: PlayerId,
    /// Player's name.
    pub name: String,
    /// Where this player's messages go.
    pub connection: ConnectionRef,
}

impl Player {
    /// Sends a message to this player if their connection is still open.
    pub fn notify(&self, message: ServerMessage) {
        deliver(self.connection.as_ref(), message);
    }
}

/// A game with its two seats.
///
/// X is always the first joiner. The session is *pending* while the O seat
/// is empty and *active* only while both seats are filled and the game has
/// not ended.
#[derive(Debug)]
pub struct GameSession {
    /// Game ID, increasing in creation order.
    pub id: GameId,
    /// Player X.
    pub seat_x: Player,
    /// Player O, once someone has joined.
    pub seat_o: Option<Player>,
    /// Board and turn.
    pub game: Game,
    /// Whether moves are accepted.
    pub active: bool,
}

impl GameSession {
    /// Creates a pending session with the given player seated as X.
    #[instrument(skip(seat_x), fields(player_id = %seat_x.id))]
    pub fn new(id: GameId, seat_x: Player) -> Self {
        debug!("Creating pending game session");
        Self {
            id,
            seat_x,
            seat_o: None,
            game: Game::new(),
            active: false,
        }
    }

    /// True while the O seat is empty.
    pub fn is_pending(&self) -> bool {
        self.seat_o.is_none()
    }

    /// The seat held by the given player, if any.
    pub fn seat_of(&self, player_id: &str) -> Option<Mark> {
        if self.seat_x.id == player_id {
            Some(Mark::X)
        } else if self.seat_o.as_ref().is_some_and(|p| p.id == player_id) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// The player in the given seat.
    pub fn player(&self, mark: Mark) -> Option<&Player> {
        match mark {
            Mark::X => Some(&self.seat_x),
            Mark::O => self.seat_o.as_ref(),
        }
    }

    /// Names for a `game_start` message, once both seats are filled.
    pub fn seat_names(&self) -> Option<SeatNames> {
        self.seat_o.as_ref().map(|o| SeatNames {
            x: self.seat_x.name.clone(),
            o: o.name.clone(),
        })
    }

    /// Seats O, clears the board and activates the game.
    #[instrument(skip(self, player), fields(game_id = self.id, player_id = %player.id))]
    pub fn seat_opponent(&mut self, player: Player) {
        self.seat_o = Some(player);
        self.restart();
    }

    /// Clears the board, hands the turn to X and activates the game.
    ///
    /// A pending session stays inactive.
    pub fn restart(&mut self) {
        self.game.reset();
        self.active = !self.is_pending();
    }

    /// Sends a message to every seated player.
    pub fn broadcast(&self, message: ServerMessage) {
        self.seat_x.notify(message.clone());
        if let Some(o) = &self.seat_o {
            o.notify(message);
        }
    }
}
