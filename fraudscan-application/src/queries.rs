pub mod result_queries;
