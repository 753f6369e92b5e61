pub mod dictation;
pub mod edit;
pub mod model_service;
pub mod placement;
pub mod planner;
pub mod profile_service;
pub mod slots;
pub mod translator;
