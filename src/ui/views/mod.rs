pub mod lesson;
pub mod quiz;
pub mod review;
pub mod roadmap;
pub mod standards;
pub mod tutor;
