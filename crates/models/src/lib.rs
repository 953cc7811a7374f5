pub mod answer_sheet;
pub mod batch;
pub mod error;
pub mod feedback_type;
pub mod guard;
pub mod options;
pub mod publish_form;
pub mod report;
pub mod staff_mapping;
pub mod submission;
