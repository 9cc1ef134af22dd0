//! Export of expanded sentences to [`symbios`] state, so string-based
//! grammars can feed symbios-driven interpreters.

use crate::error::{LsysError, Result};
use crate::system::LSystem;
use symbios::{SymbiosState, SymbolTable};

impl LSystem {
    /// Interns every symbol of the current sentence in `table` and returns a
    /// state holding one parameterless module per symbol, in order.
    ///
    /// Symbols already present in `table` keep their IDs.
    pub fn to_symbios(&self, table: &mut SymbolTable) -> Result<SymbiosState> {
        let mut state = SymbiosState::new();
        let mut name = String::with_capacity(4);
        for symbol in self.current().chars() {
            name.clear();
            name.push(symbol);
            let id = table
                .intern(&name)
                .map_err(|reason| LsysError::Intern { symbol, reason })?;
            state.push(id, 0.0, &[])?;
        }
        Ok(state)
    }
}
