mod dataset;
mod error;
mod writer;

pub use dataset::{
    Dataset, Record, LABEL_COLUMN, MIN_TEXT_CHARS, SOURCE_COLUMN, TEXT_COLUMN, URL_COLUMN,
};
pub use error::StoreError;
pub use writer::CsvStore;
