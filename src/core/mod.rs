pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedEvent;
pub use observer::Observer;
pub use state::{Priority, Rank, ReadyQueue, RunCtx, Task, TaskId, TaskState, Ticks};
