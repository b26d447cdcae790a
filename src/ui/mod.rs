pub mod picker;
pub mod spinner;

pub use picker::fuzzy_pick;
pub use spinner::create_spinner;
