pub mod cancel_work_order_command;
pub mod create_work_order_command;

pub use cancel_work_order_command::CancelWorkOrderCommand;
pub use create_work_order_command::CreateWorkOrderCommand;
