// Interactable areas: occupancy, variant state and change broadcasts

mod error;
mod interactable;
mod model;
mod occupants;
mod variant;

pub use error::AreaError;
pub use interactable::{AreaPrompt, InteractableArea};
pub use model::{AreaKind, AreaModel, ConversationAreaModel, StreamingAreaModel, ViewingAreaModel};
pub use occupants::OccupantRegistry;
pub use variant::AreaVariant;
