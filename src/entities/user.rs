use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
    pub places: Vec<Uuid>,
}

impl User {
    pub fn new(name: String, email: String, password: String, image: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            image,
            places: Vec::new(),
        }
    }
}

// listing projection, never carries the password hash
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub places: Vec<Uuid>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            places: user.places,
        }
    }
}

#[test]
fn public_user_excludes_password_test() {
    let user = User::new(
        "Michael".into(),
        "michael@example.com".into(),
        "$2b$12$fakehash".into(),
        "uploads/images/avatar.png".into(),
    );

    let public: PublicUser = user.into();
    let value = serde_json::to_value(&public).unwrap();

    assert!(value.get("password").is_none());
    assert_eq!(value["email"], "michael@example.com");
}
