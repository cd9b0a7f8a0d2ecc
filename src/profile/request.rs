//! Request model for profile updates

use std::fmt;

/// Identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

/// A request to change a user's name and email.
///
/// Produced by a caller and consumed once by
/// [`update_customer_profile`](super::update_customer_profile).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateProfileRequest {
    /// The account being updated
    pub user_id: UserId,
    /// The new display name
    pub name: String,
    /// The new email address
    pub email: String,
}

impl UpdateProfileRequest {
    /// Build a request.
    ///
    /// ```
    /// use readertask::profile::{UpdateProfileRequest, UserId};
    ///
    /// let request = UpdateProfileRequest::new(1, "foo", "b@x.com");
    /// assert_eq!(request.user_id, UserId(1));
    /// ```
    pub fn new(
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        UpdateProfileRequest {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_request_json_shape() {
        let request = UpdateProfileRequest::new(7, "foo", "b@x.com");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user_id": 7, "name": "foo", "email": "b@x.com" })
        );

        let back: UpdateProfileRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }
}
