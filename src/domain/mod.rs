pub mod resource;

pub use resource::{
    Access, Column, ColumnKind, FieldValue, Fields, FileSlot, Join, ListQuery, Record,
    ResourceSpec, SortOrder, slugify,
};
