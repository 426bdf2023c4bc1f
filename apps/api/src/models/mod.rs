pub mod candidate;
pub mod job_description;

pub use candidate::CandidateRecord;
pub use job_description::JobDescription;
