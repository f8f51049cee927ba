//! JSON serialization for chain errors.
//!
//! An error serializes to its full rendered message string; the serializer
//! handles escaping of special characters.

use serde::{Serialize, Serializer};

use crate::chain::Error;

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::Error;

    #[test]
    fn test_serializes_to_message_string() {
        let err = Error::wrap(Some(Error::new("inner")), "outer").unwrap();
        assert_eq!(serde_json::to_string(&err).unwrap(), "\"outer: inner\"");
    }

    #[test]
    fn test_escapes_special_characters() {
        let err = Error::new("path \"C:\\tmp\"");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            "\"path \\\"C:\\\\tmp\\\"\""
        );
    }

    #[test]
    fn test_serializes_inside_struct() {
        #[derive(serde::Serialize)]
        struct Response<'a> {
            ok: bool,
            error: &'a Error,
        }

        let err = Error::new("denied");
        let body = serde_json::to_string(&Response {
            ok: false,
            error: &err,
        })
        .unwrap();
        assert_eq!(body, "{\"ok\":false,\"error\":\"denied\"}");
    }
}
