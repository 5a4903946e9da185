use std::collections::HashMap;

use crate::users::models::{Role, User};

pub fn filter_by_role<'a>(users: impl IntoIterator<Item = &'a User>, role: Role) -> Vec<&'a User> {
    users.into_iter().filter(|u| u.role() == role).collect()
}

/// One `Name | Role: role | Permissions: p1, p2` line per user.
pub fn summarize<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<String> {
    users
        .into_iter()
        .map(|u| {
            let permissions: Vec<&str> = u.permissions().iter().map(|p| p.as_str()).collect();
            format!(
                "{} | Role: {} | Permissions: {}",
                u.name(),
                u.role(),
                permissions.join(", ")
            )
        })
        .collect()
}

/// Later users overwrite earlier ones with the same email.
pub fn index_by_email<'a>(users: impl IntoIterator<Item = &'a User>) -> HashMap<&'a str, &'a User> {
    users.into_iter().map(|u| (u.email(), u)).collect()
}

/// Reusable name search bound to a fixed list of users.
pub type Searcher<'a> = Box<dyn Fn(&str) -> Vec<&'a User> + 'a>;

/// Captures the given users now and returns a case-insensitive name search
/// over that snapshot.
pub fn make_searcher<'a>(users: impl IntoIterator<Item = &'a User>) -> Searcher<'a> {
    let users: Vec<&'a User> = users.into_iter().collect();
    Box::new(move |term: &str| {
        let term = term.to_lowercase();
        users
            .iter()
            .copied()
            .filter(|u| u.name().to_lowercase().contains(&term))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::users::models::{AdminUser, CustomerUser, MembershipLevel};

    fn admin(name: &str, email: &str, super_admin: bool) -> User {
        AdminUser::new(AppState::fake(), name, email, super_admin)
            .unwrap()
            .into()
    }

    fn customer(name: &str, email: &str, level: MembershipLevel) -> User {
        CustomerUser::new(AppState::fake(), name, email, level)
            .unwrap()
            .into()
    }

    fn sample() -> Vec<User> {
        vec![
            admin("Alice Admin", "alice@example.com", true),
            admin("Bob Manager", "bob@example.com", false),
            customer("Charlie Customer", "charlie@example.com", MembershipLevel::Premium),
            customer("Diana User", "diana@example.com", MembershipLevel::Basic),
            customer("Eve VIP", "eve@example.com", MembershipLevel::Vip),
        ]
    }

    #[test]
    fn filter_keeps_order() {
        let users = sample();
        let admins = filter_by_role(&users, Role::Admin);
        let names: Vec<&str> = admins.iter().map(|u| u.name()).collect();
        assert_eq!(names, ["Alice Admin", "Bob Manager"]);

        let customers = filter_by_role(&users, Role::Customer);
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].name(), "Charlie Customer");
        assert_eq!(customers[2].name(), "Eve VIP");

        assert!(filter_by_role(&users[..0], Role::Admin).is_empty());
    }

    #[test]
    fn summaries_follow_input() {
        let users = sample();
        let lines = summarize(&users);
        assert_eq!(lines.len(), users.len());
        assert_eq!(
            lines[1],
            "Bob Manager | Role: admin | Permissions: read, write, delete, manage_users"
        );
        assert_eq!(
            lines[3],
            "Diana User | Role: customer | Permissions: read, view_profile"
        );
    }

    #[test]
    fn summarize_filtered_subset() {
        let users = sample();
        let lines = summarize(filter_by_role(&users, Role::Admin));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Alice Admin | Role: admin"));
    }

    #[test]
    fn index_finds_each_user() {
        let users = vec![
            admin("Alice", "alice@example.com", true),
            customer("Carl", "carl@example.com", MembershipLevel::Basic),
            customer("Eve", "eve@example.com", MembershipLevel::Vip),
        ];
        let index = index_by_email(&users);
        assert_eq!(index.len(), 3);
        for u in &users {
            let found = index.get(u.email()).expect("indexed");
            assert!(std::ptr::eq(*found, u));
        }
        assert!(index.get("nobody@example.com").is_none());
    }

    #[test]
    fn index_last_write_wins() {
        let users = vec![
            admin("First", "same@example.com", false),
            customer("Second", "same@example.com", MembershipLevel::Basic),
        ];
        let index = index_by_email(&users);
        assert_eq!(index.len(), 1);
        assert_eq!(index["same@example.com"].name(), "Second");
    }

    #[test]
    fn searcher_matches_case_insensitively() {
        let users = vec![
            admin("Alice Admin", "alice@example.com", true),
            customer("Charlie Customer", "charlie@example.com", MembershipLevel::Premium),
        ];
        let search = make_searcher(&users);

        let found = search("Admin");
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], &users[0]));

        let found = search("Customer");
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], &users[1]));

        let found = search("admin");
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], &users[0]));

        assert_eq!(search("li").len(), 2);
        assert_eq!(search("").len(), 2);
        assert!(search("zed").is_empty());
    }

    #[test]
    fn searcher_uses_snapshot() {
        let users = sample();
        let mut subset: Vec<&User> = users.iter().take(2).collect();
        let search = make_searcher(subset.iter().copied());
        subset.push(&users[4]);
        subset.remove(0);

        assert_eq!(search("a").len(), 2);
        assert!(search("Eve").is_empty());
        assert_eq!(search("alice")[0].name(), "Alice Admin");
    }
}
