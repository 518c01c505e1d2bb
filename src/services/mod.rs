pub mod deadline_monitor;
pub mod progress;
pub mod stage_flow;
pub mod work_orders;

pub use deadline_monitor::DeadlineMonitor;
pub use progress::ProgressService;
pub use stage_flow::StageFlowService;
pub use work_orders::WorkOrderService;
