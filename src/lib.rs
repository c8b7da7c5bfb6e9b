// poem-topics: topic modeling for classical poem corpora
//
// This is the library root. Each module corresponds to one stage of the
// load → vectorize → fit → report pipeline.

pub mod config;
pub mod corpus;
pub mod output;
pub mod pipeline;
pub mod topics;
