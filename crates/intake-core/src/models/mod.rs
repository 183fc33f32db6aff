pub mod document;

pub use document::{
    DocumentField, DocumentMeta, DocumentRecordUpdate, GetDocumentsResponse,
    UploadDocumentsResponse,
};
