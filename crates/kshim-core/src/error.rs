//! Kernel error numbers and the error-value pointer encoding.
//!
//! The hosted structure reports failures as negative errno values and, in a
//! few places, smuggles them through pointer-sized words (the top
//! [`MAX_ERRNO`] values of the address space are never valid pointers).

use std::error::Error;
use std::fmt;

/// Largest errno that can be encoded in a pointer-sized error value.
pub const MAX_ERRNO: usize = 4095;

/// Error numbers used by the hosted structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Errno {
    /// Out of memory (`ENOMEM`).
    NoMemory,
    /// Resource busy, e.g. an index is already occupied (`EBUSY`).
    Busy,
    /// Invalid argument (`EINVAL`).
    Invalid,
}

impl Errno {
    /// `ENOMEM`.
    pub const ENOMEM: i32 = 12;
    /// `EBUSY`.
    pub const EBUSY: i32 = 16;
    /// `EINVAL`.
    pub const EINVAL: i32 = 22;

    /// The positive errno code.
    pub const fn code(self) -> i32 {
        match self {
            Self::NoMemory => Self::ENOMEM,
            Self::Busy => Self::EBUSY,
            Self::Invalid => Self::EINVAL,
        }
    }

    /// The code as returned by kernel functions (`-ENOMEM` etc).
    pub const fn to_negative(self) -> i32 {
        -self.code()
    }

    /// Map a positive or negative errno code back to an [`Errno`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code.unsigned_abs() as i32 {
            Self::ENOMEM => Some(Self::NoMemory),
            Self::EBUSY => Some(Self::Busy),
            Self::EINVAL => Some(Self::Invalid),
            _ => None,
        }
    }

    /// Encode as a pointer-sized error value (`ERR_PTR`).
    pub const fn to_err_value(self) -> usize {
        (self.code() as usize).wrapping_neg()
    }

    /// Decode a pointer-sized error value (`PTR_ERR`), if it is one.
    pub fn from_err_value(value: usize) -> Option<Self> {
        if !is_err_value(value) {
            return None;
        }
        Self::from_code(value.wrapping_neg() as i32)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMemory => write!(f, "out of memory (ENOMEM)"),
            Self::Busy => write!(f, "resource busy (EBUSY)"),
            Self::Invalid => write!(f, "invalid argument (EINVAL)"),
        }
    }
}

impl Error for Errno {}

/// Whether `value` lies in the error-value range (`IS_ERR_VALUE`).
#[inline]
pub const fn is_err_value(value: usize) -> bool {
    value >= MAX_ERRNO.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_linux() {
        assert_eq!(Errno::NoMemory.code(), 12);
        assert_eq!(Errno::Busy.code(), 16);
        assert_eq!(Errno::Invalid.code(), 22);
        assert_eq!(Errno::NoMemory.to_negative(), -12);
    }

    #[test]
    fn from_code_accepts_either_sign() {
        assert_eq!(Errno::from_code(-16), Some(Errno::Busy));
        assert_eq!(Errno::from_code(22), Some(Errno::Invalid));
        assert_eq!(Errno::from_code(5), None);
    }

    #[test]
    fn err_value_round_trip() {
        let v = Errno::NoMemory.to_err_value();
        assert!(is_err_value(v));
        assert_eq!(Errno::from_err_value(v), Some(Errno::NoMemory));
    }

    #[test]
    fn ordinary_values_are_not_errors() {
        assert!(!is_err_value(0));
        assert!(!is_err_value(0x1000));
        assert!(!is_err_value(usize::MAX - MAX_ERRNO));
        assert!(is_err_value(usize::MAX));
        assert_eq!(Errno::from_err_value(0x100), None);
    }

    #[test]
    fn display_names_the_code() {
        assert_eq!(Errno::Busy.to_string(), "resource busy (EBUSY)");
    }
}
