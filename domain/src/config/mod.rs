//! Greeter-specific knowledge about configuration keys

pub mod known_keys;

pub use known_keys::{
    ConfigKeyInfo, GREETER_GROUP, ValueKind, default_for, is_default, known_keys, lookup_key,
};
