pub mod channel;
pub mod envelope;
pub mod identifier;
pub mod step;
pub mod workflow;

pub use channel::{Channel, ChannelCapacity, ChannelClosed};
pub use envelope::Envelope;
pub use identifier::Identifier;
pub use step::Step;
pub use workflow::{Workflow, WorkflowBuilder};
