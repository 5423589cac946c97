pub mod invite;
pub mod slots;

pub use invite::{DEFAULT_DESCRIPTION, Invite, invite_mail, render_invite};
pub use slots::*;
