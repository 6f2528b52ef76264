//! Extensions to Kubernetes API types.

mod dynamic_object;

pub use self::dynamic_object::DynamicObjectExt;
