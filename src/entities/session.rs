use serde::{Deserialize, Serialize};
use uuid::Uuid;

// issued on signup and login
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

#[test]
fn session_wire_shape_test() {
    let session = Session {
        user_id: Uuid::new_v4(),
        email: "michael@example.com".into(),
        token: "abc.def.ghi".into(),
    };

    let value = serde_json::to_value(&session).unwrap();

    assert!(value.get("userId").is_some());
    assert!(value.get("user_id").is_none());
    assert_eq!(value["token"], "abc.def.ghi");
}
