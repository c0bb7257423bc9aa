//! Viewport bookkeeping: which logical rows are on screen and what they hold.

mod viewport;
mod window;

pub use viewport::Viewport;
pub use window::RowWindow;
