use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        // Accepts both the hyphenated and the 32-digit simple form.
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

id_type!(CustomerId);
id_type!(AppointmentId);
id_type!(TaskId);
id_type!(CommunicationId);

#[cfg(test)]
mod tests {
    use super::CustomerId;
    use std::str::FromStr;

    #[test]
    fn parses_simple_and_hyphenated_forms() {
        let id = CustomerId::new();
        let hyphenated = id.to_string();
        let simple = hyphenated.replace('-', "");
        assert_eq!(CustomerId::from_str(&hyphenated).unwrap(), id);
        assert_eq!(CustomerId::from_str(&simple).unwrap(), id);
    }

    #[test]
    fn rejects_garbage() {
        assert!(CustomerId::from_str("not-an-id").is_err());
    }
}
