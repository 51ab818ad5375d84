mod bucket_name;
mod entry_id;
mod object_key;
mod object_tags;
mod region;
mod storage_class;

pub use bucket_name::BucketName;
pub use entry_id::EntryId;
pub use object_key::ObjectKey;
pub use object_tags::ObjectTags;
pub use region::{Region, DEFAULT_REGION, SUPPORTED_REGIONS};
pub use storage_class::StorageClass;
