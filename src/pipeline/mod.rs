// Pipeline orchestration — chains corpus loading, vectorizing, fitting and tabulation.

pub mod analysis;

pub use analysis::{run, Analysis};
