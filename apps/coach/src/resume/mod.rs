// Resume Analysis Flow Controller: resume text in, gated ATS report out.

pub mod controller;
pub mod file_input;
