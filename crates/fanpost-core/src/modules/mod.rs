pub mod beam;
pub mod drag;
pub mod forces;
pub mod serialization;

mod dispatch;
mod traits;

pub use dispatch::execute_module;
pub use traits::ModuleExecutor;
