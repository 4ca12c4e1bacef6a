pub mod appraisal;
pub mod employee;
pub mod evaluation;
pub mod goal;
pub mod reference;
