pub mod dialog;
pub mod page;
pub mod pin;

pub use dialog::{render_details, Dialog, LodgeCard};
pub use page::render_page;
pub use pin::{render_pin, Pin};
