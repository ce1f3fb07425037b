mod memoization_tests;
mod parser_error_tests;
