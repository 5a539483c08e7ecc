mod button;
mod feedback;
mod input_field;

pub use button::ActionButton;
pub use feedback::{FieldError, Toast, ToastQueue, ToastStack, Toaster};
pub use input_field::InputField;
