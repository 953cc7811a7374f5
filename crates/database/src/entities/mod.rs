pub mod alumni_answers;
pub mod alumni_responses;
pub mod answers;
pub mod departments;
pub mod dept_subjects;
pub mod employer_answers;
pub mod employer_responses;
pub mod feedback;
pub mod question_options;
pub mod questions;
pub mod regulations;
pub mod responses;
pub mod staff_mappings;
pub mod staff_profiles;
pub mod student_profiles;
pub mod subjects;
