//! Code for handling the names of generators, lines and zones
use anyhow::{Result, ensure};
use std::borrow::Borrow;
use std::collections::HashSet;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone, std::hash::Hash, PartialEq, Eq, serde::Deserialize, Debug, serde::Serialize,
        )]
        /// An ID type (e.g. `GeneratorID`, `LineID`, etc.)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}

define_id_type! {GeneratorID}
define_id_type! {LineID}
define_id_type! {ZoneID}

/// Check that the given IDs are non-empty and contain no duplicates
pub fn check_ids_unique<'a, I, T>(ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a T>,
    T: Borrow<str> + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        let id = <T as Borrow<str>>::borrow(id);
        ensure!(!id.is_empty(), "IDs cannot be empty");
        ensure!(seen.insert(id), "Duplicate ID found: {id}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ids_unique() {
        let ids: [GeneratorID; 2] = ["a".into(), "b".into()];
        assert!(check_ids_unique(&ids).is_ok());

        let ids: [GeneratorID; 2] = ["a".into(), "a".into()];
        assert!(check_ids_unique(&ids).is_err());

        let ids: [ZoneID; 1] = ["".into()];
        assert!(check_ids_unique(&ids).is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(LineID::new("north_south").to_string(), "north_south");
    }
}
