pub(crate) mod auth_service;
pub(crate) mod category_service;
pub(crate) mod comment_service;
pub(crate) mod paging;
pub(crate) mod post_service;
pub(crate) mod profile_service;

#[cfg(test)]
pub(crate) mod test_support;
