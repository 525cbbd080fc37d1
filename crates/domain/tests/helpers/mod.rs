pub mod builders;

pub use builders::ServiceRecordBuilder;
