//! Tool-mode handlers.

pub mod draft;
pub mod idle;
pub mod pan;
pub mod select;
pub mod text;

pub use draft::DraftHandler;
pub use idle::IdleHandler;
pub use pan::PanHandler;
pub use select::SelectHandler;
pub use text::TextHandler;
