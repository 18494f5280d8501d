use hickory_proto::rr::{Name, RecordType};

/// Typed-map key. Owner names are stored lowercased so lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: String,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &Name, record_type: RecordType) -> Self {
        Self {
            name: owner_key(name),
            record_type,
        }
    }
}

#[inline]
pub fn owner_key(name: &Name) -> String {
    name.to_lowercase().to_ascii()
}
