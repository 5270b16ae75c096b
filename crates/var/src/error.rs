// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::fmt::{Debug, Formatter};
use strum::{Display as StrumDisplay, EnumString};

/// An error raised by an operation on a `Var`, carrying a code and an optional human readable
/// message.
#[derive(Clone, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{code}{}", render_msg(.msg))]
pub struct Error {
    pub code: ErrorCode,
    pub msg: Option<Box<String>>,
}

impl Error {
    pub fn new(code: ErrorCode, msg: Option<String>) -> Self {
        Self {
            code,
            msg: msg.map(Box::new),
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        if let Some(msg) = &self.msg {
            return msg.as_ref().clone();
        }
        // Default message if one not provided.
        match self.code {
            ErrorCode::TypeMismatch => "Type mismatch".into(),
            ErrorCode::Range => "Range error".into(),
            ErrorCode::KeyNotFound => "Key not found".into(),
            ErrorCode::InvalidArgument => "Invalid argument".into(),
            ErrorCode::Conversion => "Conversion failed".into(),
            ErrorCode::Config => "Configuration error".into(),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.msg {
            Some(msg) => write!(f, "{}({msg:?})", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

fn render_msg(msg: &Option<Box<String>>) -> String {
    match msg {
        Some(msg) => format!(" ({msg})"),
        None => String::new(),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, StrumDisplay, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ErrorCode {
    /// The operation is not defined for the shape of the payload.
    TypeMismatch,
    /// A sequence index fell outside the sequence.
    Range,
    /// A map key or property name is absent.
    KeyNotFound,
    /// The value has no representation in the requested form.
    InvalidArgument,
    /// Typed extraction of a payload failed.
    Conversion,
    /// A property source could not be loaded.
    Config,
}

impl ErrorCode {
    pub fn msg<S: ToString>(self, s: S) -> Error {
        Error::new(self, Some(s.to_string()))
    }

    pub fn with_msg<F>(self, f: F) -> Error
    where
        F: FnOnce() -> String,
    {
        Error::new(self, Some(f()))
    }
}

impl PartialEq<ErrorCode> for Error {
    fn eq(&self, other: &ErrorCode) -> bool {
        self.code == *other
    }
}

impl From<ErrorCode> for Error {
    fn from(val: ErrorCode) -> Self {
        Error::new(val, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_error_display() {
        let e: Error = ErrorCode::Range.into();
        assert_eq!(e.to_string(), "Range");
        assert_eq!(e.message(), "Range error");

        let e = ErrorCode::KeyNotFound.msg("no such key: \"a\"");
        assert_eq!(e.to_string(), "KeyNotFound (no such key: \"a\")");
        assert_eq!(e, ErrorCode::KeyNotFound);
    }

    #[test]
    fn test_error_code_parse() {
        assert_eq!(
            ErrorCode::from_str("typemismatch").unwrap(),
            ErrorCode::TypeMismatch
        );
        assert!(ErrorCode::from_str("E_NOPE").is_err());
    }
}
