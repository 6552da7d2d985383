use micromatrix_codec::{Catalog, CodecError};
use micromatrix_core::WordEntry;
use micromatrix_game::{Session, SessionOptions};

use crate::{layout_source::LayoutSource, persistence::StreakStore};

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub source: LayoutSource,
    pub streak: StreakStore,
}

impl AppState {
    /// Builds the catalog from `words` and generates the first puzzle.
    pub fn new(
        words: Vec<WordEntry>,
        mut source: LayoutSource,
        options: SessionOptions,
        streak: StreakStore,
    ) -> Result<Self, CodecError> {
        let catalog = Catalog::build(words)?;
        let session = Session::new(catalog, &mut source, options);
        Ok(Self {
            session,
            source,
            streak,
        })
    }

    pub fn new_puzzle(&mut self) {
        self.session.new_puzzle(&mut self.source);
    }
}
