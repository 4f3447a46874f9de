use std::fmt;
use num_enum::TryFromPrimitive;

/// Variant name for known values, the raw decimal value otherwise.
pub fn enum_name_or_raw<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::Display,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => raw.to_string(),
    }
}

pub fn compute_crc32(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
