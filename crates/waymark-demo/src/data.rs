//! Hardcoded user records backing the users pages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
}

static USERS: [User; 3] = [
    User {
        id: 1,
        name: "Taro Tanaka",
        email: "tanaka@example.com",
        role: "Engineer",
    },
    User {
        id: 2,
        name: "Hanako Sato",
        email: "sato@example.com",
        role: "Designer",
    },
    User {
        id: 3,
        name: "Jiro Suzuki",
        email: "suzuki@example.com",
        role: "Product Manager",
    },
];

pub fn all_users() -> &'static [User] {
    &USERS
}

/// Looks a user up by the raw `userId` path parameter
///
/// The key is compared as text, so `01` does not find user `1`.
pub fn find_user(id: &str) -> Option<&'static User> {
    USERS.iter().find(|user| user.id.to_string() == id)
}
