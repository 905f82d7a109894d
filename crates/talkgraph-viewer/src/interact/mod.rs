pub mod controller;
pub mod input;
pub mod view;

pub use controller::InteractionController;
pub use input::pointer_input;
pub use view::ViewTransform;
