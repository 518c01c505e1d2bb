pub mod dispatch_stage_command;
pub mod receive_stage_command;
pub mod record_manufacturing_command;
pub mod report_defect_command;
pub mod stage_decision_command;

pub use dispatch_stage_command::DispatchStageCommand;
pub use receive_stage_command::ReceiveStageCommand;
pub use record_manufacturing_command::RecordManufacturingCommand;
pub use report_defect_command::ReportDefectCommand;
pub use stage_decision_command::{StageDecision, StageDecisionCommand};
