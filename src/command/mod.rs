//! Text command layer: parsing, dispatch onto the ledger, and the
//! interactive prompt loop.

pub mod parser;
pub mod repl;
pub mod router;
