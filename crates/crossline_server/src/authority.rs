//! Matchmaking and move arbitration.

use crate::connection::ConnectionRef;
use crate::error::MoveRejection;
use crate::protocol::{PlayerId, ServerMessage};
use crate::session::{GameId, GameSession, Player};
use crossline_tictactoe::{GameStatus, Mark, Move, Position};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

/// Message sent to a player who tries to join while already seated.
pub const ALREADY_IN_GAME: &str = "You are already in a game";

/// What happened to a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The player is already seated; they were sent an `error`.
    Rejected,
    /// The player opened a new game as X and waits for an opponent.
    Waiting(GameId),
    /// The player took the O seat and the game started.
    Started(GameId),
}

/// What an accepted move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on with the given seat to move.
    Continued(Mark),
    /// The mover completed a line.
    Won {
        /// The mover's seat.
        winner: Mark,
        /// Indices of the completed line.
        line: [usize; 3],
    },
    /// The board filled up without a line.
    Drawn,
}

/// Owns every live game.
///
/// Games are keyed by an increasing id, so iteration follows creation order
/// and the oldest pending game is always the first one offered to a new
/// joiner. The seat index maps each seated player to their single game.
#[derive(Debug, Default)]
pub struct GameAuthority {
    games: BTreeMap<GameId, GameSession>,
    seats: HashMap<PlayerId, GameId>,
    next_game_id: GameId,
}

impl GameAuthority {
    /// Creates an authority with no games.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live games, pending ones included.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// The game the player is seated in.
    pub fn game_of(&self, player_id: &str) -> Option<&GameSession> {
        self.seats
            .get(player_id)
            .and_then(|game_id| self.games.get(game_id))
    }

    /// Whether the player holds a seat in a live game.
    pub fn is_seated(&self, player_id: &str) -> bool {
        self.seats.contains_key(player_id)
    }

    /// Seats a player: in the oldest pending game as O, or in a new game as X.
    #[instrument(skip_all, fields(player_id = %player_id, name = %name))]
    pub fn join(
        &mut self,
        player_id: PlayerId,
        name: String,
        connection: ConnectionRef,
    ) -> JoinOutcome {
        let player = Player {
            id: player_id.clone(),
            name,
            connection,
        };

        if self.is_seated(&player_id) {
            warn!("Player tried to join while already seated");
            player.notify(ServerMessage::Error {
                message: ALREADY_IN_GAME.to_string(),
            });
            return JoinOutcome::Rejected;
        }

        let pending = self
            .games
            .values_mut()
            .find(|session| session.is_pending());

        if let Some(session) = pending {
            let game_id = session.id;
            session.seat_opponent(player);
            self.seats.insert(player_id.clone(), game_id);

            let Some(players) = session.seat_names() else {
                return JoinOutcome::Started(game_id);
            };
            let start = ServerMessage::GameStart { players };
            session.seat_x.notify(start.clone());
            if let Some(o) = &session.seat_o {
                o.notify(ServerMessage::GameJoined {
                    player_id,
                    symbol: Mark::O,
                });
                o.notify(start);
            }

            info!(game_id, "Opponent seated, game started");
            return JoinOutcome::Started(game_id);
        }

        self.next_game_id += 1;
        let game_id = self.next_game_id;
        player.notify(ServerMessage::GameJoined {
            player_id: player_id.clone(),
            symbol: Mark::X,
        });
        self.games.insert(game_id, GameSession::new(game_id, player));
        self.seats.insert(player_id, game_id);

        info!(game_id, "No pending game, opened a new one");
        JoinOutcome::Waiting(game_id)
    }

    /// Applies a move for the player.
    ///
    /// A refused move changes nothing and notifies no one; the caller
    /// decides whether the sender hears about it.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, player_id: &str, cell: i64) -> Result<MoveOutcome, MoveRejection> {
        let session = self
            .seats
            .get(player_id)
            .and_then(|game_id| self.games.get_mut(game_id))
            .ok_or(MoveRejection::NoGame)?;

        if !session.active {
            return Err(MoveRejection::GameNotActive);
        }

        let mark = session.seat_of(player_id).ok_or(MoveRejection::NoGame)?;
        if session.game.current_turn() != mark {
            return Err(MoveRejection::NotYourTurn);
        }

        let position = Position::from_cell(cell).ok_or(MoveRejection::CellOutOfRange)?;
        let status = *session.game.place(Move::new(mark, position))?;

        let outcome = match status {
            GameStatus::InProgress => {
                let next = session.game.current_turn();
                session.broadcast(ServerMessage::MoveMade {
                    board: session.game.board().clone(),
                    current_turn: next,
                });
                MoveOutcome::Continued(next)
            }
            GameStatus::Won { winner, line } => {
                session.active = false;
                session.broadcast(ServerMessage::game_over(Some(winner), Some(line)));
                MoveOutcome::Won { winner, line }
            }
            GameStatus::Draw => {
                session.active = false;
                session.broadcast(ServerMessage::game_over(None, None));
                MoveOutcome::Drawn
            }
        };

        debug!(
            game_id = session.id,
            ?outcome,
            open_cells = Position::valid_moves(session.game.board()).len(),
            board = %session.game.board().display(),
            "Move accepted"
        );
        Ok(outcome)
    }

    /// Restarts the player's game with a fresh board and X to move.
    ///
    /// Returns the game id, or `None` when the player has no game or the
    /// game still waits for an opponent.
    #[instrument(skip(self))]
    pub fn reset(&mut self, player_id: &str) -> Option<GameId> {
        let session = self
            .seats
            .get(player_id)
            .and_then(|game_id| self.games.get_mut(game_id))?;

        let Some(players) = session.seat_names() else {
            debug!(game_id = session.id, "Ignoring reset of a pending game");
            return None;
        };

        session.restart();
        session.broadcast(ServerMessage::GameStart { players });

        info!(game_id = session.id, "Game reset");
        Some(session.id)
    }

    /// Removes the player's game and tells the other seat, if still
    /// connected, that the game is over.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, player_id: &str) -> Option<GameId> {
        let game_id = self.seats.remove(player_id)?;
        let session = self.games.remove(&game_id)?;

        let opponent = match session.seat_of(player_id) {
            Some(mark) => session.player(mark.opponent()),
            None => None,
        };

        if let Some(opponent) = opponent {
            self.seats.remove(&opponent.id);
            opponent.notify(ServerMessage::opponent_left());
            info!(game_id, opponent_id = %opponent.id, "Game abandoned, opponent notified");
        } else {
            info!(game_id, "Pending game abandoned");
        }

        Some(game_id)
    }
}
