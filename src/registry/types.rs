//! Type descriptors standing in for runtime class metadata.
//!
//! The registry is keyed by [`ErrorType`], a handle carrying a stable
//! identity (`TypeId`), a display name, and an explicit single-parent link.
//! Error types opt in by implementing [`Notifiable`]; the parent link is a
//! plain function pointer so the whole hierarchy is statically known.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Descriptor for one error type in the notification hierarchy.
///
/// Identity is the `TypeId` alone; the name and parent link do not
/// participate in equality or hashing.
#[derive(Debug, Clone, Copy)]
pub struct ErrorType {
    id: TypeId,
    name: &'static str,
    parent: Option<fn() -> ErrorType>,
}

impl ErrorType {
    /// Descriptor for a root type (no parent to fall back to).
    pub fn root<E: 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<E>(),
            name,
            parent: None,
        }
    }

    /// Descriptor for a type deriving from `parent` in the notification
    /// hierarchy. Single inheritance only: one parent per type.
    pub fn derived<E: 'static>(name: &'static str, parent: fn() -> ErrorType) -> Self {
        Self {
            id: TypeId::of::<E>(),
            name,
            parent: Some(parent),
        }
    }

    /// Shorthand for `E::error_type()`.
    pub fn of<E: Notifiable>() -> Self {
        E::error_type()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<ErrorType> {
        self.parent.map(|resolve| resolve())
    }

    /// Iterate the type itself and then each parent, nearest first,
    /// terminating at the root.
    pub fn ancestors(self) -> Ancestors {
        Ancestors { next: Some(self) }
    }
}

impl PartialEq for ErrorType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ErrorType {}

impl Hash for ErrorType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Nearest-first walk over a type and its parent chain.
pub struct Ancestors {
    next: Option<ErrorType>,
}

impl Iterator for Ancestors {
    type Item = ErrorType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Errors that can be routed to email notifications.
///
/// Implementors declare where they sit in the notification hierarchy:
///
/// ```
/// use errmail::{ErrorType, Notifiable};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("storage unavailable")]
/// struct StorageError;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("disk full")]
/// struct DiskFullError;
///
/// impl Notifiable for StorageError {
///     fn error_type() -> ErrorType {
///         ErrorType::root::<Self>("StorageError")
///     }
/// }
///
/// impl Notifiable for DiskFullError {
///     fn error_type() -> ErrorType {
///         ErrorType::derived::<Self>("DiskFullError", StorageError::error_type)
///     }
/// }
/// ```
pub trait Notifiable: std::error::Error {
    /// The descriptor for this type, including its parent link.
    fn error_type() -> ErrorType
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("base")]
    struct BaseError;

    #[derive(Debug, Error)]
    #[error("mid")]
    struct MidError;

    #[derive(Debug, Error)]
    #[error("leaf")]
    struct LeafError;

    impl Notifiable for BaseError {
        fn error_type() -> ErrorType {
            ErrorType::root::<Self>("BaseError")
        }
    }

    impl Notifiable for MidError {
        fn error_type() -> ErrorType {
            ErrorType::derived::<Self>("MidError", BaseError::error_type)
        }
    }

    impl Notifiable for LeafError {
        fn error_type() -> ErrorType {
            ErrorType::derived::<Self>("LeafError", MidError::error_type)
        }
    }

    #[test]
    fn identity_is_the_type_not_the_name() {
        let a = ErrorType::root::<BaseError>("one name");
        let b = ErrorType::root::<BaseError>("another name");
        assert_eq!(a, b);
        assert_ne!(ErrorType::of::<BaseError>(), ErrorType::of::<MidError>());
    }

    #[test]
    fn ancestors_walk_nearest_first_to_root() {
        let names: Vec<&str> = ErrorType::of::<LeafError>()
            .ancestors()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, ["LeafError", "MidError", "BaseError"]);
    }

    #[test]
    fn root_has_no_parent() {
        assert!(ErrorType::of::<BaseError>().parent().is_none());
        assert_eq!(ErrorType::of::<BaseError>().ancestors().count(), 1);
    }
}
