pub mod background;
pub mod session;
pub mod shortcuts;

pub use background::{Background, BackgroundKind, GradientStop};
pub use session::Session;
pub use shortcuts::{ShortcutAction, ShortcutMap};
