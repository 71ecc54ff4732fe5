use crate::schema::users;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Insertable)]
#[serde(rename_all = "camelCase")]
#[table_name = "users"]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_created: NaiveDateTime,
}

/// Body of `POST /users`. Only presence of the body is validated, so
/// omitted strings fall back to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMessage {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
}

/// Body of `PUT /users/{id}`. Missing and `null` fields both leave the
/// stored value alone.
#[derive(Debug, Default, Deserialize, AsChangeset)]
#[serde(rename_all = "camelCase")]
#[table_name = "users"]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.date_of_birth.is_none()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            user.date_of_birth = Some(date_of_birth);
        }
    }
}

impl From<UserMessage> for User {
    fn from(user: UserMessage) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: user.username,
            password: user.password,
            email: user.email,
            date_of_birth: user.date_of_birth,
            date_created: Utc::now().naive_utc(),
        }
    }
}
