//! User profile formatting

use crate::models::User;

pub fn format_user(user: &User) -> String {
    let mut output = String::new();
    let name = if user.name.is_empty() {
        "(no name)"
    } else {
        &user.name
    };

    output.push_str(&format!("User:  {}\n", name));
    output.push_str(&format!("Email: {}\n", user.email));
    output.push_str(&format!("ID:    {}\n", user.id));
    if let Some(created) = user.created_at {
        output.push_str(&format!("Since: {}\n", created.format("%Y-%m-%d")));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::test_user;

    #[test]
    fn test_format_user() {
        let output = format_user(&test_user());
        assert!(output.contains("Email: ana@example.com"));
    }
}
