pub mod appraisal;
pub mod evaluation;
pub mod goal;
