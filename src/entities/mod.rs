pub mod contractor_entry;
pub mod cp_entry;
pub mod factory_entry;
pub mod farmer_entry;
pub mod inspection_entry;
pub mod jsr_entry;
pub mod stage_record;
pub mod stage_status;
pub mod user;
pub mod warehouse_entry;
pub mod work_order;
