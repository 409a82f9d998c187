use crate::data::post_repository::{Pagination, PostFilter, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::PostSummary;

/// Fixed page size for every post listing.
pub(crate) const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub(crate) struct PostPage {
    pub(crate) posts: Vec<PostSummary>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
}

/// 1-based page selection; out-of-range values clamp to the nearest valid
/// page instead of erroring. An empty result set still reports page 1.
pub(crate) fn clamp_page(requested: u32, total: i64, page_size: u32) -> u32 {
    let last_page = if total <= 0 {
        1
    } else {
        ((total - 1) / i64::from(page_size) + 1) as u32
    };
    requested.clamp(1, last_page)
}

pub(crate) async fn list_page<P: PostRepository>(
    repo: &P,
    filter: PostFilter,
    requested_page: u32,
) -> Result<PostPage, DomainError> {
    let total = repo.count_posts(filter).await?;
    let page = clamp_page(requested_page, total, PAGE_SIZE);
    let posts = repo
        .list_posts(
            filter,
            Pagination {
                page,
                page_size: PAGE_SIZE,
            },
        )
        .await?;

    Ok(PostPage {
        posts,
        page,
        page_size: PAGE_SIZE,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::clamp_page;

    #[test]
    fn page_zero_clamps_to_first() {
        assert_eq!(clamp_page(0, 25, 10), 1);
    }

    #[test]
    fn page_beyond_last_clamps_to_last() {
        assert_eq!(clamp_page(99, 25, 10), 3);
        assert_eq!(clamp_page(99, 30, 10), 3);
        assert_eq!(clamp_page(99, 31, 10), 4);
    }

    #[test]
    fn empty_listing_reports_page_one() {
        assert_eq!(clamp_page(5, 0, 10), 1);
    }

    #[test]
    fn in_range_page_is_untouched() {
        assert_eq!(clamp_page(2, 25, 10), 2);
    }
}
