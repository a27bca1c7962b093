pub mod observer;
pub mod work;

pub use observer::WorkflowObserver;
pub use work::{Payload, Work};
