//! Game state: the board, both hands and the side to move, plus the move
//! executor and the game-status query.

use crate::bitboard::{Bitboard, Board, SQUARE_MASKS, row_of, squares};
use crate::config::Config;
use crate::constants::{ALL_KINDS, NUM_SQUARES, Piece, PieceKind, Player};
use crate::error::{EngineResult, MoveError, SfenError};
use crate::hand::Hand;
use crate::move_gen::{is_king_in_check, pseudo_legal_moves};
use crate::movelist::MoveList;
use crate::r#move::Move;
use crate::rules;
use tracing::{debug, trace};

/// The standard opening position.
pub const INITIAL_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Snapshot of check and checkmate status for both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub game_over: bool,
    /// The player who is not checkmated, once the game is over.
    pub winner: Option<Player>,
    pub sente_in_check: bool,
    pub gote_in_check: bool,
}

/// What an executed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// The moved piece as it now stands on the destination.
    pub piece: Piece,
    /// The captured piece as it stood on the board, before demotion.
    pub captured: Option<Piece>,
    pub promoted: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    hands: [Hand; 2],
    current_player: Player,
    ply: u32,
    config: Config,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A new game from the standard opening with the default rules.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            board: Board::initial(),
            hands: [Hand::new(), Hand::new()],
            current_player: Player::Sente,
            ply: 1,
            config,
        }
    }

    /// Builds a game from a position string:
    /// `<layout> <b|w> <hands|-> <move number>`.
    pub fn from_sfen(sfen: &str, config: Config) -> Result<Self, SfenError> {
        let fields: Vec<&str> = sfen.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(SfenError::FieldCount(fields.len()));
        }

        let board = Board::from_sfen_layout(fields[0])?;
        let current_player = match fields[1] {
            "b" => Player::Sente,
            "w" => Player::Gote,
            other => return Err(SfenError::SideToMove(other.to_string())),
        };
        let hands = parse_hands(fields[2])?;
        let ply = match fields[3].parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(SfenError::MoveNumber(fields[3].to_string())),
        };

        check_piece_counts(&board, &hands)?;
        // The side to move could otherwise take the king.
        let waiting = current_player.opponent();
        if is_king_in_check(&board, waiting) {
            return Err(SfenError::WaitingSideInCheck(waiting));
        }

        Ok(Self { board, hands, current_player, ply, config })
    }

    pub fn to_sfen(&self) -> String {
        let side = match self.current_player {
            Player::Sente => 'b',
            Player::Gote => 'w',
        };
        let mut hands = self.hands[Player::Sente.index()].to_sfen(Player::Sente);
        hands.push_str(&self.hands[Player::Gote.index()].to_sfen(Player::Gote));
        if hands.is_empty() {
            hands.push('-');
        }
        format!("{} {} {} {}", self.board.to_sfen_layout(), side, hands, self.ply)
    }

    /// Starts over from the standard opening, keeping the configuration.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::with_config(config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self, player: Player) -> &Hand {
        &self.hands[player.index()]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of the next move, starting at 1.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Legal destinations of the piece on `sq`, whoever owns it.
    pub fn legal_moves(&self, sq: usize) -> Bitboard {
        if sq >= NUM_SQUARES {
            return 0;
        }
        rules::legal_moves(&self.board, sq)
    }

    /// Every legal move of the side to move, without promotion requests.
    pub fn legal_move_list(&self) -> MoveList {
        let mut moves = MoveList::new();
        for from_sq in squares(self.board.player_bitboard(self.current_player)) {
            for to_sq in squares(rules::legal_moves(&self.board, from_sq)) {
                moves.add(Move::new(from_sq, to_sq, false));
            }
        }
        moves
    }

    /// Whether the piece on `from_sq` would be offered promotion on `to_sq`.
    pub fn can_promote(&self, from_sq: usize, to_sq: usize) -> bool {
        if to_sq >= NUM_SQUARES {
            return false;
        }
        match self.board.piece_at(from_sq) {
            Some(piece) => rules::can_promote_in_zone(
                piece,
                row_of(to_sq),
                self.config.promotion_zone_depth,
            ),
            None => false,
        }
    }

    pub fn in_check(&self, player: Player) -> bool {
        is_king_in_check(&self.board, player)
    }

    pub fn is_checkmate(&self, player: Player) -> bool {
        rules::is_checkmate(&self.board, player)
    }

    /// Executes a move for the side to move.
    ///
    /// The move is validated from scratch, including king safety, so this is
    /// safe to call without consulting [`GameState::legal_moves`] first. On
    /// rejection nothing changes.
    pub fn execute(
        &mut self,
        from_sq: usize,
        to_sq: usize,
        promote: bool,
    ) -> Result<MoveOutcome, MoveError> {
        let piece = self.validate(from_sq, to_sq).map_err(|err| {
            trace!(%err, "move rejected");
            err
        })?;
        let mover = self.current_player;

        let promoted = rules::resolve_promotion(&self.config, piece, to_sq, promote);
        let captured = self.board.move_piece(from_sq, to_sq);
        if let Some(captured_piece) = captured {
            self.hands[mover.index()].add(captured_piece, mover);
        }
        if promoted {
            self.board.promote_at(to_sq);
        }

        self.current_player = mover.opponent();
        self.ply += 1;

        let mv = Move::new(from_sq, to_sq, promoted);
        debug!(
            player = ?mover,
            mv = %mv,
            kind = ?piece.kind,
            captured = ?captured.map(|p| p.kind),
            promoted,
            "move executed"
        );

        Ok(MoveOutcome {
            mv,
            piece: Piece { promoted: piece.promoted || promoted, ..piece },
            captured,
            promoted,
        })
    }

    pub fn make_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.execute(mv.from_sq(), mv.to_sq(), mv.is_promotion())
    }

    /// Parses `"RC-RC"` and executes it with the given promotion decision.
    pub fn play_notation(&mut self, notation: &str, promote: bool) -> EngineResult<MoveOutcome> {
        let mv: Move = notation.trim().parse()?;
        Ok(self.make_move(mv.with_promotion(promote))?)
    }

    fn validate(&self, from_sq: usize, to_sq: usize) -> Result<Piece, MoveError> {
        for square in [from_sq, to_sq] {
            if square >= NUM_SQUARES {
                return Err(MoveError::OffBoard { square });
            }
        }
        let piece = self
            .board
            .piece_at(from_sq)
            .ok_or(MoveError::NoPieceAtSquare { square: from_sq })?;
        if piece.owner != self.current_player {
            return Err(MoveError::WrongOwner { square: from_sq, player: self.current_player });
        }
        if matches!(self.board.piece_at(to_sq), Some(target) if target.kind == PieceKind::King) {
            return Err(MoveError::KingCapture { square: to_sq });
        }
        let target = SQUARE_MASKS[to_sq];
        if pseudo_legal_moves(&self.board, from_sq) & target == 0 {
            return Err(MoveError::Unreachable { from: from_sq, to: to_sq });
        }
        if rules::legal_moves(&self.board, from_sq) & target == 0 {
            return Err(MoveError::ExposesKing {
                from: from_sq,
                to: to_sq,
                player: self.current_player,
            });
        }
        Ok(piece)
    }

    /// Check and checkmate status of both players.
    ///
    /// Check is computed once per player; the escape search only runs for a
    /// player who is actually in check.
    pub fn status(&self) -> GameStatus {
        let sente_in_check = is_king_in_check(&self.board, Player::Sente);
        let gote_in_check = is_king_in_check(&self.board, Player::Gote);
        let sente_mated = sente_in_check && !rules::has_legal_move(&self.board, Player::Sente);
        let gote_mated = gote_in_check && !rules::has_legal_move(&self.board, Player::Gote);
        debug_assert!(!(sente_mated && gote_mated), "both kings checkmated");

        let winner = if sente_mated {
            Some(Player::Gote)
        } else if gote_mated {
            Some(Player::Sente)
        } else {
            None
        };
        if let Some(winner) = winner {
            debug!(?winner, ply = self.ply, "checkmate");
        }

        GameStatus {
            game_over: winner.is_some(),
            winner,
            sente_in_check,
            gote_in_check,
        }
    }
}

fn check_piece_counts(board: &Board, hands: &[Hand; 2]) -> Result<(), SfenError> {
    for kind in ALL_KINDS {
        let count = [Player::Sente, Player::Gote]
            .into_iter()
            .map(|player| board.count_pieces(player, kind) + hands[player.index()].count(kind))
            .sum::<usize>();
        let max = kind.set_count();
        if count > max {
            return Err(SfenError::PieceCount { kind, count, max });
        }
    }
    Ok(())
}

fn parse_hands(field: &str) -> Result<[Hand; 2], SfenError> {
    let mut hands = [Hand::new(), Hand::new()];
    if field == "-" {
        return Ok(hands);
    }
    let invalid = || SfenError::Hand(field.to_string());

    let mut count: Option<usize> = None;
    for ch in field.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let n = count.unwrap_or(0) * 10 + digit as usize;
            if n == 0 || n > 18 {
                return Err(invalid());
            }
            count = Some(n);
            continue;
        }
        let kind = PieceKind::from_sfen_char(ch)
            .filter(|&k| k != PieceKind::King)
            .ok_or_else(invalid)?;
        let holder = if ch.is_ascii_uppercase() { Player::Sente } else { Player::Gote };
        for _ in 0..count.take().unwrap_or(1) {
            hands[holder.index()].add(Piece::new(kind, holder), holder);
        }
    }
    if count.is_some() || field.is_empty() {
        return Err(invalid());
    }
    Ok(hands)
}
