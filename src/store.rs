//! In-memory users store, shared through Leptos context.
//!
//! Components mutate the list only through the four store operations; the
//! list manipulation itself lives in plain functions so it can be tested
//! without a reactive runtime.

use leptos::prelude::*;

use crate::types::User;

/// Handle to the process-wide list of users. Cheap to copy.
#[derive(Clone, Copy)]
pub struct UsersStore {
    users: RwSignal<Vec<User>>,
}

impl UsersStore {
    pub fn new() -> Self {
        Self {
            users: RwSignal::new(Vec::new()),
        }
    }

    /// Fetches the store provided by `App`. Panics if used outside it.
    pub fn expect() -> Self {
        expect_context::<UsersStore>()
    }

    pub fn list(&self) -> Vec<User> {
        self.users.get()
    }

    /// Replaces the list wholesale.
    pub fn set(&self, list: Vec<User>) {
        self.users.set(list);
    }

    /// Appends a new record.
    pub fn add(&self, user: User) {
        self.users.update(|list| add_user(list, user));
    }

    /// Replaces the profile fields of the record with a matching id.
    pub fn update(&self, user: User) {
        self.users.update(|list| update_user(list, &user));
    }

    /// Removes the record with a matching id, preserving list order.
    pub fn delete(&self, id: &str) {
        let id = id.to_owned();
        self.users.update(move |list| delete_user(list, &id));
    }
}

impl Default for UsersStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn add_user(list: &mut Vec<User>, user: User) {
    list.push(user);
}

/// Replaces `name`, `email`, and `location` on the matching record. Unknown
/// ids are a no-op; order and length never change.
pub fn update_user(list: &mut [User], updated: &User) {
    if let Some(user) = list.iter_mut().find(|user| user.id == updated.id) {
        user.name = updated.name.clone();
        user.email = updated.email.clone();
        user.location = updated.location.clone();
    }
}

/// Order-preserving removal; deleting an id that is not present leaves the
/// list unchanged.
pub fn delete_user(list: &mut Vec<User>, id: &str) {
    list.retain(|user| user.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StreetAddress, UserLocation, UserName};

    fn user(id: &str, first: &str) -> User {
        User {
            id: id.to_string(),
            name: UserName {
                title: "Ms".to_string(),
                first: first.to_string(),
                last: "Example".to_string(),
            },
            email: format!("{}@example.com", first),
            location: UserLocation {
                country: "Norway".to_string(),
                city: "Oslo".to_string(),
                street: StreetAddress {
                    name: "Main".to_string(),
                    number: 1,
                },
            },
            ..User::default()
        }
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut list = vec![user("1", "Ada")];
        add_user(&mut list, user("2", "Grace"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, "2");
    }

    #[test]
    fn test_update_replaces_profile_fields_in_place() {
        let mut list = vec![user("1", "Ada"), user("2", "Grace")];
        let mut edited = user("2", "Grace");
        edited.email = "grace@navy.mil".to_string();
        edited.location.city = "Arlington".to_string();

        update_user(&mut list, &edited);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].email, "Ada@example.com");
        assert_eq!(list[1].email, "grace@navy.mil");
        assert_eq!(list[1].location.city, "Arlington");
        // Order unchanged.
        assert_eq!(list[0].id, "1");
        assert_eq!(list[1].id, "2");
    }

    #[test]
    fn test_update_unknown_id_is_a_no_op() {
        let mut list = vec![user("1", "Ada")];
        let before = list.clone();
        update_user(&mut list, &user("missing", "Nobody"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut list = vec![user("1", "Ada"), user("2", "Grace"), user("3", "Edith")];
        delete_user(&mut list, "2");
        let ids: Vec<_> = list.iter().map(|user| user.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut list = vec![user("1", "Ada")];
        delete_user(&mut list, "nope");
        delete_user(&mut list, "nope");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "1");
    }
}
