use micromatrix_core::Position;
use micromatrix_game::Key;

/// A request from the player, parsed from one command line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Action {
    Focus(Position),
    Click(Position),
    Type { at: Option<Position>, text: String },
    Key { at: Option<Position>, key: Key },
    Check,
    NewPuzzle,
    Show,
    Help,
    Quit,
}
