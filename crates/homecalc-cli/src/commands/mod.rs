pub mod affordability;
pub mod insurance;
pub mod mortgage;
