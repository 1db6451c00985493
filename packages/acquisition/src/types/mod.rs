pub mod candidates;
pub mod image;
pub mod page;
pub mod report;
