pub mod threaded_stage_scheduler;
