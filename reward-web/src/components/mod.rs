//! UI Components

pub mod connect_button;
pub mod navbar;
pub mod toasts;

pub use connect_button::ConnectButton;
pub use navbar::Navbar;
pub use toasts::Toasts;
