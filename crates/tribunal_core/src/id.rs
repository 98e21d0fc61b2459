//! Newtype ids for platform entities
//!
//! The platform transports every id as a decimal string (snowflake), so the
//! newtypes wrap `String` and serialize transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

id_type! {
    /// A guild member or account id.
    UserId
}

id_type! {
    /// A channel or thread id. Threads are channels on the wire, so case
    /// surfaces use this type as well.
    ChannelId
}

id_type! {
    /// A posted message id.
    MessageId
}

id_type! {
    /// A guild role id.
    RoleId
}

id_type! {
    /// A forum category label (applied tag) id.
    LabelId
}

impl UserId {
    /// Chat-format mention for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl RoleId {
    /// Chat-format mention for this role.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.0)
    }
}
