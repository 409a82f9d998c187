use crate::application::paging::{PostPage, list_page};
use crate::data::post_repository::{PostFilter, PostRepository};
use crate::data::user_repository::{ProfilePatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{UpdateProfileRequest, User};

#[derive(Debug, Clone)]
pub(crate) struct ProfilePosts {
    pub(crate) profile: User,
    pub(crate) page: PostPage,
}

pub(crate) struct ProfileService<U: UserRepository, P: PostRepository> {
    users: U,
    posts: P,
}

impl<U: UserRepository, P: PostRepository> ProfileService<U, P> {
    pub(crate) fn new(users: U, posts: P) -> Self {
        Self { users, posts }
    }

    /// Profile listing. When the viewer is the profile owner the visibility
    /// predicate is skipped entirely; everyone else gets the public subset.
    pub(crate) async fn profile_posts(
        &self,
        username: &str,
        viewer: Option<i64>,
        page: u32,
    ) -> Result<ProfilePosts, DomainError> {
        let profile = self
            .users
            .get_profile(username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user: {username}")))?;

        let filter = PostFilter {
            category_id: None,
            author_id: Some(profile.id),
            public_only: viewer != Some(profile.id),
        };
        let page = list_page(&self.posts, filter, page).await?;

        Ok(ProfilePosts { profile, page })
    }

    pub(crate) async fn update_profile(
        &self,
        actor_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let req = req.validate()?;

        let patch = ProfilePatch {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        };
        self.users
            .update_profile(actor_id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {actor_id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::ProfileService;
    use crate::application::test_support::FakePostRepo;
    use crate::data::user_repository::{
        NewUser, ProfilePatch, UserCredentials, UserRepository,
    };
    use crate::domain::error::DomainError;
    use crate::domain::user::{UpdateProfileRequest, User};

    const OWNER: i64 = 10;
    const STRANGER: i64 = 99;

    #[derive(Clone, Default)]
    struct FakeUserRepo {
        profile: Arc<Mutex<Option<User>>>,
        update_call: Arc<Mutex<Option<(i64, ProfilePatch)>>>,
    }

    impl FakeUserRepo {
        fn with_profile(profile: Option<User>) -> Self {
            Self {
                profile: Arc::new(Mutex::new(profile)),
                update_call: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, _input: NewUser) -> Result<User, DomainError> {
            Err(DomainError::Unexpected("not used".to_string()))
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(None)
        }

        async fn get_profile(&self, _username: &str) -> Result<Option<User>, DomainError> {
            Ok(self.profile.lock().expect("profile mutex poisoned").clone())
        }

        async fn update_profile(
            &self,
            user_id: i64,
            patch: ProfilePatch,
        ) -> Result<Option<User>, DomainError> {
            *self.update_call.lock().expect("update mutex poisoned") =
                Some((user_id, patch.clone()));
            Ok(Some(
                User::new(
                    user_id,
                    patch.username,
                    patch.email,
                    patch.first_name,
                    patch.last_name,
                    Utc::now(),
                )
                .expect("patched user must be valid"),
            ))
        }
    }

    fn owner() -> User {
        User::new(OWNER, "owner", "owner@example.com", None, None, Utc::now())
            .expect("sample user must be valid")
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let service = ProfileService::new(FakeUserRepo::with_profile(None), FakePostRepo::new());

        let err = service
            .profile_posts("ghost", None, 1)
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn owner_viewing_own_profile_skips_visibility_filter() {
        let posts = FakePostRepo::new();
        posts.set_listing(Vec::new(), 0);
        let service =
            ProfileService::new(FakeUserRepo::with_profile(Some(owner())), posts.clone());

        service
            .profile_posts("owner", Some(OWNER), 1)
            .await
            .expect("listing must succeed");

        let filter = posts.last_filter().expect("filter captured");
        assert_eq!(filter.author_id, Some(OWNER));
        assert!(!filter.public_only);
    }

    #[tokio::test]
    async fn strangers_and_anonymous_get_public_subset() {
        let posts = FakePostRepo::new();
        posts.set_listing(Vec::new(), 0);
        let service =
            ProfileService::new(FakeUserRepo::with_profile(Some(owner())), posts.clone());

        service
            .profile_posts("owner", Some(STRANGER), 1)
            .await
            .expect("listing must succeed");
        assert!(posts.last_filter().expect("filter captured").public_only);

        service
            .profile_posts("owner", None, 1)
            .await
            .expect("listing must succeed");
        assert!(posts.last_filter().expect("filter captured").public_only);
    }

    #[tokio::test]
    async fn update_profile_normalizes_and_targets_actor() {
        let users = FakeUserRepo::with_profile(Some(owner()));
        let service = ProfileService::new(users.clone(), FakePostRepo::new());

        let updated = service
            .update_profile(
                OWNER,
                UpdateProfileRequest {
                    username: "  new_name  ".to_string(),
                    email: " NEW@Example.com ".to_string(),
                    first_name: Some("  ".to_string()),
                    last_name: Some(" Smith ".to_string()),
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(updated.username, "new_name");
        assert_eq!(updated.email, "new@example.com");

        let (user_id, patch) = users
            .update_call
            .lock()
            .expect("update mutex poisoned")
            .clone()
            .expect("update captured");
        assert_eq!(user_id, OWNER);
        assert_eq!(patch.first_name, None);
        assert_eq!(patch.last_name.as_deref(), Some("Smith"));
    }
}
