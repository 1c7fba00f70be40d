pub mod markdown_file_document;
