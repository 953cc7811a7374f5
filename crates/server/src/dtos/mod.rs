pub mod feedback;
pub mod lookup;
pub mod report;
