pub mod file_ref;
pub mod link_match;
pub mod link_resolver;
pub mod link_scanner;
