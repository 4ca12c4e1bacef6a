pub mod appraisal_repo;
pub mod employee_repo;
pub mod goal_repo;
pub mod reference_repo;

pub use appraisal_repo::AppraisalRepo;
pub use employee_repo::EmployeeRepo;
pub use goal_repo::{DraftWrite, GoalRepo};
pub use reference_repo::ReferenceRepo;
