pub mod acquire;
pub mod detect_smiles_use_case;
pub mod handoff;
pub mod infrastructure;
pub mod pipeline_logger;
pub mod shutdown;
pub mod stage;
pub mod stages;
