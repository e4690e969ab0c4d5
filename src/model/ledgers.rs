pub mod lines;
pub mod parsed;
