use crate::application::paging::{PostPage, list_page};
use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::{PostFilter, PostRepository};
use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct CategoryPosts {
    pub(crate) category: Category,
    pub(crate) page: PostPage,
}

pub(crate) struct CategoryService<K: CategoryRepository, P: PostRepository> {
    categories: K,
    posts: P,
}

impl<K: CategoryRepository, P: PostRepository> CategoryService<K, P> {
    pub(crate) fn new(categories: K, posts: P) -> Self {
        Self { categories, posts }
    }

    /// Category page: the category must exist and be published, and the
    /// listing only carries publicly visible posts.
    pub(crate) async fn posts_in_category(
        &self,
        slug: &str,
        page: u32,
    ) -> Result<CategoryPosts, DomainError> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|category| category.published.is_published)
            .ok_or_else(|| DomainError::NotFound(format!("category slug: {slug}")))?;

        let filter = PostFilter {
            category_id: Some(category.id),
            author_id: None,
            public_only: true,
        };
        let page = list_page(&self.posts, filter, page).await?;

        Ok(CategoryPosts { category, page })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::CategoryService;
    use crate::application::test_support::FakePostRepo;
    use crate::data::category_repository::CategoryRepository;
    use crate::domain::category::Category;
    use crate::domain::error::DomainError;
    use crate::domain::published::Published;

    #[derive(Clone, Default)]
    struct FakeCategoryRepo {
        category: Arc<Mutex<Option<Category>>>,
    }

    impl FakeCategoryRepo {
        fn with_category(category: Option<Category>) -> Self {
            Self {
                category: Arc::new(Mutex::new(category)),
            }
        }
    }

    #[async_trait]
    impl CategoryRepository for FakeCategoryRepo {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Category>, DomainError> {
            Ok(self.category.lock().expect("category mutex poisoned").clone())
        }
    }

    fn category(is_published: bool) -> Category {
        Category {
            id: 7,
            title: "Travel".to_string(),
            description: "Travel notes".to_string(),
            slug: "travel".to_string(),
            published: Published::new(is_published, Utc::now()),
        }
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let service =
            CategoryService::new(FakeCategoryRepo::with_category(None), FakePostRepo::new());

        let err = service
            .posts_in_category("travel", 1)
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn unpublished_category_is_not_found() {
        let service = CategoryService::new(
            FakeCategoryRepo::with_category(Some(category(false))),
            FakePostRepo::new(),
        );

        let err = service
            .posts_in_category("travel", 1)
            .await
            .expect_err("hidden category must be absent");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn published_category_lists_public_posts_only() {
        let posts = FakePostRepo::new();
        posts.set_listing(Vec::new(), 0);
        let service = CategoryService::new(
            FakeCategoryRepo::with_category(Some(category(true))),
            posts.clone(),
        );

        let result = service
            .posts_in_category("travel", 1)
            .await
            .expect("listing must succeed");
        assert_eq!(result.category.slug, "travel");
        assert_eq!(result.page.page, 1);

        let filter = posts.last_filter().expect("filter captured");
        assert_eq!(filter.category_id, Some(7));
        assert!(filter.public_only);
    }
}
