pub mod get_documents;
pub mod upload_documents;
pub mod uploaded_file;
