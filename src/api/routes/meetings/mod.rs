pub mod public;
mod router;

pub use router::{NO_FREE_SLOT_MESSAGE, NO_SUGGESTION_MESSAGE, router};
