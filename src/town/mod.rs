// Towns: area directory, player bookkeeping and the owning task

mod actor;
mod directory;
mod error;
mod space;

pub use actor::{TownCommand, TownHandle};
pub use directory::{AreaDirectory, Transition};
pub use error::TownError;
pub use space::{MoveOutcome, Town, TownSnapshot};
